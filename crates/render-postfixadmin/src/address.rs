//! Network addresses with a component default port

use std::fmt;

use serde::Serialize;

use crate::{Error, Result};

/// Default SMTP relay port.
pub const SMTP_PORT: u16 = 25;

/// Default PostgreSQL port.
pub const POSTGRES_PORT: u16 = 5432;

/// Host and port a client connects to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

/// An address as exposed to templates: `address.connect.host` and
/// `address.connect.port`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub connect: Endpoint,
}

impl Address {
    /// Parse `host`, `host:port`, `[v6]` or `[v6]:port`.
    ///
    /// A bare IPv6 literal without brackets is taken as a host without port.
    ///
    /// ```
    /// use render_postfixadmin::Address;
    ///
    /// let addr = Address::parse("mail.example.com", 25).unwrap();
    /// assert_eq!(addr.connect.port, 25);
    ///
    /// let addr = Address::parse("[2001:db8::1]:587", 25).unwrap();
    /// assert_eq!(addr.connect.host, "2001:db8::1");
    /// assert_eq!(addr.connect.port, 587);
    /// ```
    pub fn parse(input: &str, default_port: u16) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidAddress {
            input: input.to_string(),
            reason: reason.to_string(),
        };
        let trimmed = input.trim();

        let (host, port) = if let Some(rest) = trimmed.strip_prefix('[') {
            let (host, after) = rest
                .split_once(']')
                .ok_or_else(|| invalid("missing ']'"))?;
            match after {
                "" => (host, None),
                _ => {
                    let port = after
                        .strip_prefix(':')
                        .ok_or_else(|| invalid("expected ':' after ']'"))?;
                    (host, Some(port))
                }
            }
        } else if trimmed.matches(':').count() > 1 {
            (trimmed, None)
        } else {
            match trimmed.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (trimmed, None),
            }
        };

        if host.is_empty() {
            return Err(invalid("empty host"));
        }
        let port = match port {
            Some(raw) => raw
                .parse::<u16>()
                .ok()
                .filter(|p| *p != 0)
                .ok_or_else(|| invalid("port must be a number between 1 and 65535"))?,
            None => default_port,
        };

        Ok(Self {
            connect: Endpoint {
                host: host.to_string(),
                port,
            },
        })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.connect.host.contains(':') {
            write!(f, "[{}]:{}", self.connect.host, self.connect.port)
        } else {
            write!(f, "{}:{}", self.connect.host, self.connect.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("mail.example.com", "mail.example.com", 25)]
    #[case("mail.example.com:2525", "mail.example.com", 2525)]
    #[case(" 10.0.0.5:587 ", "10.0.0.5", 587)]
    #[case("[::1]", "::1", 25)]
    #[case("[::1]:465", "::1", 465)]
    #[case("2001:db8::25", "2001:db8::25", 25)]
    fn parses_addresses(#[case] input: &str, #[case] host: &str, #[case] port: u16) {
        let addr = Address::parse(input, SMTP_PORT).unwrap();
        assert_eq!(addr.connect, Endpoint { host: host.to_string(), port });
    }

    #[rstest]
    #[case("")]
    #[case(":25")]
    #[case("host:")]
    #[case("host:smtp")]
    #[case("host:0")]
    #[case("host:70000")]
    #[case("[::1")]
    #[case("[::1]25")]
    fn rejects_invalid_addresses(#[case] input: &str) {
        assert!(matches!(
            Address::parse(input, SMTP_PORT),
            Err(Error::InvalidAddress { .. })
        ));
    }

    #[test]
    fn display_brackets_ipv6() {
        assert_eq!(Address::parse("::1", 25).unwrap().to_string(), "[::1]:25");
        assert_eq!(Address::parse("db", POSTGRES_PORT).unwrap().to_string(), "db:5432");
    }
}
