use std::str::FromStr;

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeploymentEnvironment {
    Local,
    Dev,
    Staging,
    Prod,
}

impl DeploymentEnvironment {
    /// Cookies are only marked `Secure` once TLS sits in front of the server.
    pub fn uses_secure_cookies(&self) -> bool {
        !matches!(self, DeploymentEnvironment::Local)
    }
}

impl FromStr for DeploymentEnvironment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(DeploymentEnvironment::Local),
            "dev" => Ok(DeploymentEnvironment::Dev),
            "stg" | "staging" => Ok(DeploymentEnvironment::Staging),
            "prd" | "prod" => Ok(DeploymentEnvironment::Prod),
            other => Err(anyhow::anyhow!("Unknown CURR_ENV value: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_environments() {
        assert_eq!(
            "PRD".parse::<DeploymentEnvironment>().unwrap(),
            DeploymentEnvironment::Prod
        );
        assert_eq!(
            " stg ".parse::<DeploymentEnvironment>().unwrap(),
            DeploymentEnvironment::Staging
        );
        assert!("qa".parse::<DeploymentEnvironment>().is_err());
    }

    #[test]
    fn only_local_skips_secure_cookies() {
        assert!(!DeploymentEnvironment::Local.uses_secure_cookies());
        assert!(DeploymentEnvironment::Prod.uses_secure_cookies());
    }
}
