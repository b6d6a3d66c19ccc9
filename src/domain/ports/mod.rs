mod shop_api_port;

pub use shop_api_port::ShopApiPort;

#[cfg(test)]
pub mod mocks {
    pub use super::shop_api_port::MockShopApiPort;
    pub use super::shop_api_port::scripted::ScriptedShopApi;
}
