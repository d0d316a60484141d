//! Converts metadata attachments into artifact model fragments.
//!
//! Two attachment kinds are recognized:
//!
//! - `Config`: image settings, producing a [`DockerModel`]
//! - `CopyFiles`: one or more `source` → `target` file directives
//!
//! Any other attachment name is ignored so that hosts may attach metadata
//! meant for other consumers. Unrecognized `Config` keys are ignored as well.

use std::collections::BTreeMap;

use secrecy::SecretString;

use crate::config::ImageDefaults;
use crate::error::ProcessError;
use crate::metadata::{Attachment, KeyValue, Literal};
use crate::model::{CopyFileModel, DockerModel};
use crate::port::parse_port;

pub const CONFIG_ATTACHMENT: &str = "Config";
pub const COPY_FILES_ATTACHMENT: &str = "CopyFiles";

/// A validated contribution to the artifact model from one attachment.
#[derive(Debug, Clone)]
pub enum Fragment {
    Config(DockerModel),
    CopyFiles(Vec<CopyFileModel>),
}

#[derive(Debug, Clone, Default)]
pub struct MetadataProcessor {
    defaults: ImageDefaults,
}

impl MetadataProcessor {
    pub fn new(defaults: ImageDefaults) -> Self {
        Self { defaults }
    }

    /// Processes every attachment of a declaration, stopping at the first failure.
    pub fn process_all(&self, attachments: &[Attachment]) -> Result<Vec<Fragment>, ProcessError> {
        let mut fragments = Vec::with_capacity(attachments.len());
        for attachment in attachments {
            if let Some(fragment) = self.process(attachment)? {
                fragments.push(fragment);
            }
        }
        Ok(fragments)
    }

    /// Dispatches on the attachment name; unknown names yield `Ok(None)`.
    pub fn process(&self, attachment: &Attachment) -> Result<Option<Fragment>, ProcessError> {
        match attachment.name.as_str() {
            CONFIG_ATTACHMENT => self.process_config(attachment).map(|m| Some(Fragment::Config(m))),
            COPY_FILES_ATTACHMENT => self
                .process_copy_files(attachment)
                .map(|files| Some(Fragment::CopyFiles(files))),
            other => {
                tracing::debug!(attachment = other, "ignoring unrecognized attachment");
                Ok(None)
            }
        }
    }

    pub fn process_config(&self, attachment: &Attachment) -> Result<DockerModel, ProcessError> {
        let mut model = DockerModel::with_defaults(&self.defaults);

        for KeyValue { key, value } in &attachment.args {
            match key.as_str() {
                "name" | "imageName" => model.name = Some(image_name(key, value)?),
                "registry" => model.registry = Some(non_empty_string(key, value)?),
                "tag" => model.tag = image_tag(key, value)?,
                "baseImage" => model.base_image = non_empty_string(key, value)?,
                "push" => model.push = boolean(key, value)?,
                "buildImage" => model.build_image = boolean(key, value)?,
                "username" => model.username = Some(string(key, value)?),
                "password" => model.password = Some(SecretString::from(string(key, value)?)),
                "enableDebug" => model.enable_debug = boolean(key, value)?,
                "debugPort" => {
                    model.debug_port =
                        parse_port(value).map_err(|e| ProcessError::config(key, e.to_string()))?;
                }
                "dockerHost" => model.docker_host = Some(non_empty_string(key, value)?),
                "dockerCertPath" => model.docker_cert_path = Some(non_empty_string(key, value)?),
                other => tracing::debug!(key = other, "ignoring unrecognized Config key"),
            }
        }

        Ok(model)
    }

    pub fn process_copy_files(
        &self,
        attachment: &Attachment,
    ) -> Result<Vec<CopyFileModel>, ProcessError> {
        if let Some(files) = attachment.get("files") {
            let Literal::Array(entries) = files else {
                return Err(ProcessError::copy(
                    0,
                    format!("'files' must be an array, found {}", files.kind()),
                ));
            };
            if entries.is_empty() {
                return Err(ProcessError::copy(0, "'files' must not be empty"));
            }
            return entries
                .iter()
                .enumerate()
                .map(|(index, entry)| match entry {
                    Literal::Record(fields) => copy_entry(index, fields),
                    other => Err(ProcessError::copy(
                        index,
                        format!("expected a record, found {}", other.kind()),
                    )),
                })
                .collect();
        }

        let fields: BTreeMap<String, Literal> = attachment
            .args
            .iter()
            .map(|kv| (kv.key.clone(), kv.value.clone()))
            .collect();
        if !fields.contains_key("source") && !fields.contains_key("target") {
            return Err(ProcessError::copy(0, "no files specified"));
        }
        Ok(vec![copy_entry(0, &fields)?])
    }
}

fn copy_entry(index: usize, fields: &BTreeMap<String, Literal>) -> Result<CopyFileModel, ProcessError> {
    let field = |name: &str| -> Result<String, ProcessError> {
        match fields.get(name) {
            None => Err(ProcessError::copy(index, format!("missing {name}"))),
            Some(Literal::Str(s)) if !s.trim().is_empty() => Ok(s.clone()),
            Some(Literal::Str(_)) => Err(ProcessError::copy(index, format!("{name} must not be empty"))),
            Some(other) => Err(ProcessError::copy(
                index,
                format!("{name} must be a string, found {}", other.kind()),
            )),
        }
    };
    Ok(CopyFileModel::new(field("source")?, field("target")?))
}

/// Reads a string setting, resolving `$env{NAME}` references.
fn string(key: &str, value: &Literal) -> Result<String, ProcessError> {
    let Literal::Str(raw) = value else {
        return Err(ProcessError::config(
            key,
            format!("expected a string, found {}", value.kind()),
        ));
    };
    match raw.strip_prefix("$env{").and_then(|rest| rest.strip_suffix('}')) {
        Some(var) => std::env::var(var)
            .map_err(|e| ProcessError::config(key, format!("environment variable {var}: {e}"))),
        None => Ok(raw.clone()),
    }
}

fn non_empty_string(key: &str, value: &Literal) -> Result<String, ProcessError> {
    let s = string(key, value)?;
    if s.trim().is_empty() {
        return Err(ProcessError::config(key, "must not be empty"));
    }
    Ok(s)
}

fn image_name(key: &str, value: &Literal) -> Result<String, ProcessError> {
    let name = non_empty_string(key, value)?;
    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-' | '/'));
    let valid_edges = name.starts_with(|c: char| c.is_ascii_alphanumeric())
        && name.ends_with(|c: char| c.is_ascii_alphanumeric());
    if !valid_chars || !valid_edges {
        return Err(ProcessError::config(
            key,
            format!("{name:?} is not a valid image name (lowercase letters, digits, '.', '_', '-', '/')"),
        ));
    }
    Ok(name)
}

fn image_tag(key: &str, value: &Literal) -> Result<String, ProcessError> {
    let tag = non_empty_string(key, value)?;
    let valid = tag.len() <= 128
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if !valid {
        return Err(ProcessError::config(key, format!("{tag:?} is not a valid image tag")));
    }
    Ok(tag)
}

fn boolean(key: &str, value: &Literal) -> Result<bool, ProcessError> {
    match value {
        Literal::Bool(b) => Ok(*b),
        Literal::Str(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Literal::Str(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(ProcessError::config(
            key,
            format!("expected a boolean, found {other}"),
        )),
    }
}
