//! Document directives.
//!
//! Directives are column-0 `- key: value` lines that set document metadata.
//! They may appear anywhere after the root line and each one stands alone.

use apimodel_define::DocumentMeta;

use crate::errors::{CompileError, Result};
use crate::lines::DirectiveKey;

/// Applies one directive line to `meta`.
pub fn apply_directive(
    line_no: usize,
    raw: &str,
    key: DirectiveKey,
    meta: &mut DocumentMeta,
) -> Result<()> {
    let value = raw
        .strip_prefix(key.prefix())
        .unwrap_or_default()
        .trim();

    match key {
        DirectiveKey::Title => meta.title = value.to_string(),
        DirectiveKey::Description => meta.description = value.to_string(),
        DirectiveKey::ApiServer => meta.api_server = value.to_string(),
        DirectiveKey::Version => meta.server_version = value.to_string(),
        DirectiveKey::AuthMap => parse_auth_map(line_no, raw, value, meta)?,
        DirectiveKey::Resp => parse_envelope(value, meta),
    }
    Ok(())
}

/// `a=b, c=d`: later entries overwrite earlier ones with the same alias.
fn parse_auth_map(line_no: usize, raw: &str, value: &str, meta: &mut DocumentMeta) -> Result<()> {
    for item in value.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let Some((alias, name)) = item.split_once('=') else {
            return Err(CompileError::grammar(
                line_no,
                raw,
                format!("auth map entry '{item}' is not alias=name"),
            ));
        };
        meta.auth_map
            .insert(alias.trim().to_string(), name.trim().to_string());
    }
    Ok(())
}

/// `fields=a,b,c in=data`: unknown keys are ignored.
fn parse_envelope(value: &str, meta: &mut DocumentMeta) {
    let envelope = &mut meta.response_envelope;
    for item in value.split_whitespace() {
        match item.split_once('=') {
            Some(("fields", fields)) => {
                envelope.fields = fields
                    .split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            Some(("in", data_field)) => envelope.data_field = data_field.trim().to_string(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(raw: &str, key: DirectiveKey) -> Result<DocumentMeta> {
        let mut meta = DocumentMeta::default();
        apply_directive(5, raw, key, &mut meta)?;
        Ok(meta)
    }

    #[test]
    fn text_directives_are_trimmed() {
        let meta = apply("- title:   Shop API  ", DirectiveKey::Title).unwrap();
        assert_eq!(meta.title, "Shop API");

        let meta = apply("- apiserver: api.example.com", DirectiveKey::ApiServer).unwrap();
        assert_eq!(meta.api_server, "api.example.com");

        let meta = apply("- version: 1.2.0", DirectiveKey::Version).unwrap();
        assert_eq!(meta.server_version, "1.2.0");
    }

    #[test]
    fn auth_map_entries() {
        let meta = apply("- authmap: user=UserAuth, admin = AdminAuth,", DirectiveKey::AuthMap).unwrap();
        assert_eq!(meta.auth_map.len(), 2);
        assert_eq!(meta.auth_map["user"], "UserAuth");
        assert_eq!(meta.auth_map["admin"], "AdminAuth");
    }

    #[test]
    fn auth_map_entry_without_equals_fails() {
        let err = apply("- authmap: user", DirectiveKey::AuthMap).unwrap_err();
        assert_eq!(err.line(), Some(5));
        assert!(err.to_string().contains("'user'"));
    }

    #[test]
    fn envelope_fields_and_data_key() {
        let meta = apply("- resp: fields=code,payload,message in=payload", DirectiveKey::Resp).unwrap();
        let envelope = meta.response_envelope;
        assert_eq!(envelope.fields, vec!["code", "payload", "message"]);
        assert_eq!(envelope.data_field, "payload");
    }

    #[test]
    fn envelope_keeps_defaults_for_missing_keys() {
        let meta = apply("- resp: in=result color=blue", DirectiveKey::Resp).unwrap();
        assert_eq!(meta.response_envelope.fields, vec!["data", "msg", "stat"]);
        assert_eq!(meta.response_envelope.data_field, "result");
    }
}
