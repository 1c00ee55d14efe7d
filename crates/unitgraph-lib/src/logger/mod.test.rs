use super::*;

#[test]
fn test_default_filter_targets_both_crates() {
    assert_eq!(
        default_filter(LogLevel::Debug),
        "unitgraph=debug,unitgraph_lib=debug,debug"
    );
    assert_eq!(
        default_filter(LogLevel::Warning),
        "unitgraph=warn,unitgraph_lib=warn,warn"
    );
}

#[test]
fn test_default_filter_parses() {
    for level in [LogLevel::Error, LogLevel::Info, LogLevel::Trace] {
        assert!(EnvFilter::try_new(default_filter(level)).is_ok());
    }
}

#[test]
fn test_global_logger_initializes_once() {
    let config = LoggerConfig {
        level: LogLevel::Error,
        format: LogFormat::Text,
        output: LogOutput::Stderr,
        ansi: false,
    };

    // a subscriber may already be installed; a second init is refused either way
    let first = Logger::init(config.clone());
    if first.is_ok() {
        assert!(Logger::is_initialized());
        assert_eq!(Logger::global().map(|l| l.config().level), Some(LogLevel::Error));
    }
    assert!(Logger::init(config).is_err());
}
