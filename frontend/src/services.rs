//! 应用服务
//!
//! 凭据存储、API 客户端、导航工具在启动时组装一次，
//! 放在 `StoredValue::new_local` 中通过 Context 共享（它们持有 `Rc`，不是 `Send`）。

use std::rc::Rc;

use leptos::prelude::*;
use vidshare::config::{VAR_API_BASE, VAR_LANDING_PATH, VAR_TIMEOUT_MS, VAR_TITLE_SUFFIX};
use vidshare::route::LOGIN_PATH;
use vidshare::{ApiClient, ClientConfig, CredentialStore, Navigation, NavigationGuard, Navigator, Router};

use crate::web::history::set_document_title;
use crate::web::{BrowserHistory, BrowserStorage, FetchClient};

pub type Api = ApiClient<FetchClient>;
pub type Nav = Navigation<BrowserHistory>;

pub struct Services {
    pub credentials: CredentialStore,
    pub api: Api,
    pub navigation: Nav,
}

/// 构建时注入的配置变量
fn build_var(name: &str) -> Option<String> {
    let value = match name {
        VAR_API_BASE => option_env!("VIDSHARE_API_BASE"),
        VAR_TIMEOUT_MS => option_env!("VIDSHARE_TIMEOUT_MS"),
        VAR_LANDING_PATH => option_env!("VIDSHARE_LANDING_PATH"),
        VAR_TITLE_SUFFIX => option_env!("VIDSHARE_TITLE_SUFFIX"),
        _ => None,
    };
    value.map(str::to_string)
}

impl Services {
    /// 组装所有服务，返回服务本身和路由器（路由器还要交给 `provide_router`）
    pub fn build() -> (Self, Rc<Router<BrowserHistory>>) {
        let config = ClientConfig::from_lookup(build_var);
        log::info!("[App] API base: {}", config.api_base);

        let credentials = CredentialStore::new(BrowserStorage);

        // 401: 凭据已被客户端清空，整页跳转回登录页
        let api = ApiClient::new(FetchClient, credentials.clone(), &config)
            .on_unauthorized(|| BrowserHistory.hard_redirect(LOGIN_PATH));

        let guard = NavigationGuard::new(credentials.clone(), config).with_title_sink(set_document_title);
        let router = Rc::new(Router::new(BrowserHistory, guard));
        let navigation = Navigation::new(router.clone(), credentials.clone());

        (
            Self {
                credentials,
                api,
                navigation,
            },
            router,
        )
    }
}

/// 组件访问服务的句柄
#[derive(Clone, Copy)]
pub struct AppContext {
    services: StoredValue<Services, LocalStorage>,
}

impl AppContext {
    pub fn api(&self) -> Api {
        self.services.with_value(|s| s.api.clone())
    }

    pub fn navigation(&self) -> Nav {
        self.services.with_value(|s| s.navigation.clone())
    }

    pub fn credentials(&self) -> CredentialStore {
        self.services.with_value(|s| s.credentials.clone())
    }
}

pub fn provide_services(services: Services) -> AppContext {
    let ctx = AppContext {
        services: StoredValue::new_local(services),
    };
    provide_context(ctx);
    ctx
}

/// 从 Context 获取应用服务
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
