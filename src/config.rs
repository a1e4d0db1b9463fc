use log::LevelFilter;
use thiserror::Error;

pub const USAGE: &str = "usage: bestfit <TOTAL_SIZE> [-v | -vv | -q]";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Please provide the total size of the region. {usage}", usage = USAGE)]
    MissingSize,

    #[error("Total size must be a positive integer, got '{0}'.")]
    InvalidSize(String),

    #[error("Unknown argument '{0}'. {usage}", usage = USAGE)]
    UnknownArgument(String),
}

/// Startup parameters of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Size of the simulated address range.
    pub total_size: usize,
    /// -1 for `-q`, 0 by default, +1 per `v`.
    pub verbosity: i8,
}

impl Config {
    /// Reads the configuration from the arguments that follow the program
    /// name.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut total_size = None;
        let mut verbosity: i8 = 0;

        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "-q" | "--quiet" => verbosity = -1,
                "-v" | "--verbose" => verbosity = verbosity.saturating_add(1),
                "-vv" => verbosity = verbosity.saturating_add(2),
                _ if arg.starts_with('-') && arg.parse::<i64>().is_err() => {
                    return Err(ConfigError::UnknownArgument(arg.to_string()));
                }
                _ if total_size.is_none() => {
                    let size = arg
                        .parse::<usize>()
                        .ok()
                        .filter(|&size| size > 0)
                        .ok_or_else(|| ConfigError::InvalidSize(arg.to_string()))?;
                    total_size = Some(size);
                }
                _ => return Err(ConfigError::UnknownArgument(arg.to_string())),
            }
        }

        Ok(Self {
            total_size: total_size.ok_or(ConfigError::MissingSize)?,
            verbosity,
        })
    }

    /// Default log level. `RUST_LOG` still wins over this.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            i8::MIN..=-1 => LevelFilter::Error,
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_and_verbosity() {
        let config = Config::from_args(["1000", "-v"]).unwrap();

        assert_eq!(config, Config { total_size: 1000, verbosity: 1 });
        assert_eq!(config.log_level(), LevelFilter::Info);
        assert_eq!(Config::from_args(["-vv", "5"]).unwrap().log_level(), LevelFilter::Debug);
        assert_eq!(Config::from_args(["5", "-q"]).unwrap().log_level(), LevelFilter::Error);
    }

    #[test]
    fn size_is_required_and_positive() {
        assert_eq!(Config::from_args(Vec::<String>::new()), Err(ConfigError::MissingSize));
        assert_eq!(Config::from_args(["0"]), Err(ConfigError::InvalidSize("0".into())));
        assert_eq!(Config::from_args(["-3"]), Err(ConfigError::InvalidSize("-3".into())));
        assert_eq!(Config::from_args(["big"]), Err(ConfigError::InvalidSize("big".into())));
    }

    #[test]
    fn rejects_unknown_arguments() {
        assert_eq!(
            Config::from_args(["10", "--color"]),
            Err(ConfigError::UnknownArgument("--color".into()))
        );
        assert_eq!(
            Config::from_args(["10", "20"]),
            Err(ConfigError::UnknownArgument("20".into()))
        );
    }
}
