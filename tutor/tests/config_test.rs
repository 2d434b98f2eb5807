//! TutorConfig loading from env. Mutates process env, so every test is serial.

use serial_test::serial;
use std::env;
use tutor::TutorConfig;

fn clear_env() {
    for var in [
        "LLM_PROVIDER",
        "GEMINI_API_KEY",
        "GEMINI_BASE_URL",
        "GEMINI_MODEL",
        "OPENAI_API_KEY",
        "OPENAI_BASE_URL",
        "MODEL",
        "CLOUD_VISION_API_KEY",
        "CLOUD_VISION_URL",
        "LOG_FILE",
        "GRADE_RANGE",
    ] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "gemini-key");

    let config = TutorConfig::load().unwrap();

    assert_eq!(config.llm.llm_model, "gemini-2.0-flash");
    assert_eq!(
        config.vision_endpoint,
        "https://vision.googleapis.com/v1/images:annotate"
    );
    assert!(config.log_file.is_none());
    assert_eq!(config.grade_range, "1");
    assert_eq!(config.learner_profile().grade_range, "1");
    assert!(config.validate().is_ok());
    assert!(config.validate_vision().is_err());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "gemini-key");
    env::set_var("GEMINI_MODEL", "gemini-1.5-flash");
    env::set_var("CLOUD_VISION_API_KEY", "vision-key");
    env::set_var("CLOUD_VISION_URL", "http://localhost:9000/v1/images:annotate");
    env::set_var("LOG_FILE", "logs/tutor.log");
    env::set_var("GRADE_RANGE", "3");

    let config = TutorConfig::load().unwrap();

    assert_eq!(config.llm.llm_model, "gemini-1.5-flash");
    assert_eq!(config.vision_api_key, "vision-key");
    assert_eq!(config.vision_endpoint, "http://localhost:9000/v1/images:annotate");
    assert_eq!(config.log_file.as_deref(), Some("logs/tutor.log"));
    assert_eq!(config.grade_range, "3");
    assert!(config.validate().is_ok());
    assert!(config.validate_vision().is_ok());
    clear_env();
}

#[test]
#[serial]
fn test_validate_rejects_bad_vision_url_and_missing_key() {
    clear_env();
    let config = TutorConfig::load().unwrap();
    assert!(config.validate().is_err(), "no GEMINI_API_KEY");

    env::set_var("GEMINI_API_KEY", "gemini-key");
    env::set_var("CLOUD_VISION_URL", "not a url");
    let config = TutorConfig::load().unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("CLOUD_VISION_URL"));
    clear_env();
}
