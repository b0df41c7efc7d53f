use crate::domain::authorization::BillingAddress;
use crate::error::ConfigError;
use serde::Serialize;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const SANDBOX_BASE_URL: &str = "https://sandbox.2checkout.com";
pub const PRODUCTION_BASE_URL: &str = "https://www.2checkout.com";

/// A string that never shows up in `Debug` or `Display` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([redacted])")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[redacted]")
    }
}

#[derive(Debug, Clone)]
pub struct GatewayCredentials {
    pub seller_id: String,
    pub private_key: Secret,
    pub sandbox: bool,
}

/// Values the landing page needs for client-side tokenization. All of them
/// are public by 2Checkout's design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSettings {
    pub seller_id: String,
    pub publishable_key: Option<String>,
    pub sandbox: bool,
}

/// Order fields the server fills in when the form does not carry them.
#[derive(Debug, Clone)]
pub struct OrderDefaults {
    pub currency: String,
    pub total: String,
    pub billing_addr: BillingAddress,
}

impl Default for OrderDefaults {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            total: "10.00".to_string(),
            billing_addr: BillingAddress {
                name: "Testing Tester".to_string(),
                addr_line1: "123 Test St".to_string(),
                city: "Columbus".to_string(),
                state: "Ohio".to_string(),
                zip_code: "43123".to_string(),
                country: "USA".to_string(),
                email: "example@2co.com".to_string(),
                phone_number: "5555555555".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub public_dir: PathBuf,
    pub credentials: GatewayCredentials,
    pub checkout: CheckoutSettings,
    pub gateway_base_url: String,
    pub gateway_timeout_ms: u64,
    pub order_defaults: OrderDefaults,
}

impl AppConfig {
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = OrderDefaults::default();
        let billing = BillingAddress {
            name: env_or("BILLING_NAME", &defaults.billing_addr.name),
            addr_line1: env_or("BILLING_ADDR_LINE1", &defaults.billing_addr.addr_line1),
            city: env_or("BILLING_CITY", &defaults.billing_addr.city),
            state: env_or("BILLING_STATE", &defaults.billing_addr.state),
            zip_code: env_or("BILLING_ZIP_CODE", &defaults.billing_addr.zip_code),
            country: env_or("BILLING_COUNTRY", &defaults.billing_addr.country),
            email: env_or("BILLING_EMAIL", &defaults.billing_addr.email),
            phone_number: env_or("BILLING_PHONE_NUMBER", &defaults.billing_addr.phone_number),
        };

        let mut builder = Self::builder()
            .host(env_or("BIND_HOST", "0.0.0.0"))
            .port(parse_env("PORT", 3000)?)
            .public_dir(env_or("PUBLIC_DIR", "public"))
            .gateway_timeout_ms(parse_env("GATEWAY_TIMEOUT_MS", 10_000)?)
            .sandbox(parse_bool_env("TCO_SANDBOX", true)?)
            .order_defaults(OrderDefaults {
                currency: env_or("ORDER_CURRENCY", &defaults.currency),
                total: env_or("ORDER_TOTAL", &defaults.total),
                billing_addr: billing,
            });

        if let Ok(seller_id) = std::env::var("TCO_SELLER_ID") {
            builder = builder.seller_id(seller_id);
        }
        if let Ok(private_key) = std::env::var("TCO_PRIVATE_KEY") {
            builder = builder.private_key(private_key);
        }
        if let Ok(publishable_key) = std::env::var("TCO_PUBLISHABLE_KEY") {
            builder = builder.publishable_key(publishable_key);
        }
        if let Ok(base_url) = std::env::var("TCO_BASE_URL") {
            builder = builder.gateway_base_url(base_url);
        }

        builder.build()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfigBuilder {
    host: String,
    port: u16,
    public_dir: PathBuf,
    seller_id: Option<String>,
    private_key: Option<Secret>,
    publishable_key: Option<String>,
    sandbox: bool,
    gateway_base_url: Option<String>,
    gateway_timeout_ms: u64,
    order_defaults: OrderDefaults,
}

impl Default for AppConfigBuilder {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            public_dir: PathBuf::from("public"),
            seller_id: None,
            private_key: None,
            publishable_key: None,
            sandbox: true,
            gateway_base_url: None,
            gateway_timeout_ms: 10_000,
            order_defaults: OrderDefaults::default(),
        }
    }
}

impl AppConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = dir.into();
        self
    }

    pub fn seller_id(mut self, seller_id: impl Into<String>) -> Self {
        self.seller_id = Some(seller_id.into());
        self
    }

    pub fn private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(Secret::new(private_key));
        self
    }

    pub fn publishable_key(mut self, publishable_key: impl Into<String>) -> Self {
        self.publishable_key = Some(publishable_key.into());
        self
    }

    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn gateway_base_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_base_url = Some(url.into());
        self
    }

    pub fn gateway_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.gateway_timeout_ms = timeout_ms;
        self
    }

    pub fn order_defaults(mut self, defaults: OrderDefaults) -> Self {
        self.order_defaults = defaults;
        self
    }

    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let seller_id = self
            .seller_id
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("TCO_SELLER_ID"))?;
        let private_key = self
            .private_key
            .filter(|s| !s.expose().trim().is_empty())
            .ok_or(ConfigError::Missing("TCO_PRIVATE_KEY"))?;

        if self.gateway_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "GATEWAY_TIMEOUT_MS",
                reason: "must be greater than zero".to_string(),
            });
        }

        let host: IpAddr = self.host.trim().parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::Invalid {
                key: "BIND_HOST",
                reason: e.to_string(),
            }
        })?;
        let bind_addr = SocketAddr::new(host, self.port);

        let checkout = CheckoutSettings {
            seller_id: seller_id.clone(),
            publishable_key: self.publishable_key.filter(|k| !k.trim().is_empty()),
            sandbox: self.sandbox,
        };

        let gateway_base_url = self
            .gateway_base_url
            .unwrap_or_else(|| {
                if self.sandbox {
                    SANDBOX_BASE_URL.to_string()
                } else {
                    PRODUCTION_BASE_URL.to_string()
                }
            })
            .trim_end_matches('/')
            .to_string();

        Ok(AppConfig {
            bind_addr,
            public_dir: self.public_dir,
            credentials: GatewayCredentials {
                seller_id,
                private_key,
                sandbox: self.sandbox,
            },
            checkout,
            gateway_base_url,
            gateway_timeout_ms: self.gateway_timeout_ms,
            order_defaults: self.order_defaults,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

fn parse_bool_env(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::Invalid {
            key,
            reason: format!("expected true/false, got {raw:?}"),
        }),
        Err(_) => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
