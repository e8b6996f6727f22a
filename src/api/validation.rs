use crate::error::{LiteralError, LiteralResult};

use super::SerializerConfig;
use super::config::MAX_INDENT;

pub(super) fn validate_serializer_config(
    config: SerializerConfig,
) -> LiteralResult<SerializerConfig> {
    if let Some(indent) = config.indent {
        if indent > MAX_INDENT {
            return Err(LiteralError::InvalidConfig(format!(
                "indent must be <= {MAX_INDENT}, got {indent}"
            )));
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::validate_serializer_config;
    use crate::api::SerializerConfig;

    #[test]
    fn oversized_indent_is_rejected() {
        let err = validate_serializer_config(SerializerConfig::default().with_indent(40))
            .expect_err("indent must fail");
        assert!(format!("{err}").contains("indent must be <="));
    }

    #[test]
    fn compact_config_is_accepted() {
        let config = validate_serializer_config(SerializerConfig::compact()).expect("valid");
        assert_eq!(config.indent, None);
    }
}
