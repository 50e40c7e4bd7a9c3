use std::{env, fmt::Display, net::SocketAddr, str::FromStr, time::Duration};

pub struct Config {
    pub host: String,
    pub port: u16,
    pub broadcast_capacity: usize,
    pub sse_keep_alive: Duration,
}

impl Config {
    pub fn load() -> Self {
        Self {
            host: try_load("HOST", "0.0.0.0".to_string()),
            port: try_load("PORT", 3000),
            broadcast_capacity: try_load("BROADCAST_CAPACITY", 100),
            sse_keep_alive: Duration::from_secs(try_load("SSE_KEEP_ALIVE_SECS", 30)),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .unwrap_or_else(|e| {
                warn!("Invalid HOST {}: {e}, binding 0.0.0.0", self.host);
                SocketAddr::from(([0, 0, 0, 0], self.port))
            })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            broadcast_capacity: 100,
            sse_keep_alive: Duration::from_secs(30),
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    parse_or_default(key, env::var(key).ok(), default)
}

fn parse_or_default<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = value else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_falls_back() {
        let port: u16 = parse_or_default("PORT", None, 3000);
        assert_eq!(port, 3000);
    }

    #[test]
    fn garbage_value_falls_back() {
        let port: u16 = parse_or_default("PORT", Some("eighty".to_string()), 3000);
        assert_eq!(port, 3000);

        let capacity: usize = parse_or_default("BROADCAST_CAPACITY", Some("-4".to_string()), 100);
        assert_eq!(capacity, 100);
    }

    #[test]
    fn valid_value_wins() {
        let port: u16 = parse_or_default("PORT", Some(" 8080 ".to_string()), 3000);
        assert_eq!(port, 8080);
    }

    #[test]
    fn addr_combines_host_and_port() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 4000,
            ..Config::default()
        };
        assert_eq!(config.addr(), SocketAddr::from(([127, 0, 0, 1], 4000)));

        let bad_host = Config {
            host: "not a host".to_string(),
            ..Config::default()
        };
        assert_eq!(bad_host.addr(), SocketAddr::from(([0, 0, 0, 0], 3000)));
    }
}
