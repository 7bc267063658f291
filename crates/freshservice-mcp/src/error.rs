#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Missing configuration: set {env} or pass {flag}")]
    MissingSetting {
        env: &'static str,
        flag: &'static str,
    },
}
