use super::{Dict, Document, Value};
use crate::project::{Configuration, Project, ProjectStore, StoreError};
use crate::version::Version;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

const DOCUMENT_NAME: &str = "project.pbxproj";

/// Reads and writes `project.pbxproj` documents, either directly or inside an
/// `.xcodeproj` bundle.
#[derive(Clone, Copy, Debug, Default)]
pub struct PbxprojStore;

impl PbxprojStore {
    /// The document path for a bundle or a raw `project.pbxproj` path.
    pub fn document_path(path: &Path) -> PathBuf {
        if path.extension().is_some_and(|ext| ext == "xcodeproj") {
            path.join(DOCUMENT_NAME)
        } else {
            path.to_path_buf()
        }
    }
}

impl ProjectStore for PbxprojStore {
    fn load(&self, path: &Path) -> Result<Project, StoreError> {
        let document_path = Self::document_path(path);
        let text = fs::read_to_string(&document_path).map_err(|source| StoreError::Read {
            path: document_path.clone(),
            source,
        })?;
        let document = Document::parse(&text).map_err(|source| StoreError::Parse {
            path: document_path.clone(),
            source,
        })?;
        let project = project_from_document(document).map_err(|reason| StoreError::Malformed {
            path: document_path.clone(),
            reason,
        })?;
        debug!(
            path = %document_path.display(),
            configurations = project.configurations.len(),
            "loaded project"
        );
        Ok(project)
    }

    fn persist(&self, project: &Project, path: &Path) -> Result<(), StoreError> {
        let document_path = Self::document_path(path);
        let mut document = project.document.clone();
        apply_project(&mut document, project).map_err(|reason| StoreError::Malformed {
            path: document_path.clone(),
            reason,
        })?;

        let write_err = |source: std::io::Error| StoreError::Write {
            path: document_path.clone(),
            source,
        };
        let dir = match document_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(document.to_openstep().as_bytes())
            .map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        if let Ok(metadata) = fs::metadata(&document_path) {
            tmp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(write_err)?;
        }
        tmp.persist(&document_path)
            .map_err(|err| write_err(err.error))?;

        debug!(path = %document_path.display(), "persisted project");
        Ok(())
    }
}

fn objects(root: &Value) -> Result<&Dict, String> {
    root.as_dict()
        .and_then(|root| root.get("objects"))
        .and_then(Value::as_dict)
        .ok_or_else(|| "missing objects table".to_string())
}

fn root_object_id(root: &Value) -> Result<&str, String> {
    root.as_dict()
        .and_then(|root| root.get("rootObject"))
        .and_then(Value::as_str)
        .ok_or_else(|| "missing rootObject".to_string())
}

fn object<'a>(objects: &'a Dict, id: &str) -> Result<&'a Dict, String> {
    objects
        .get(id)
        .and_then(Value::as_dict)
        .ok_or_else(|| format!("dangling object reference {id}"))
}

fn project_from_document(document: Document) -> Result<Project, String> {
    let objects = objects(&document.root)?;
    let project = object(objects, root_object_id(&document.root)?)?;

    let recorded_version = match project
        .get("attributes")
        .and_then(Value::as_dict)
        .and_then(|attributes| attributes.get("LastUpgradeCheck"))
    {
        None => None,
        Some(value) => {
            let text = value
                .as_str()
                .ok_or_else(|| "LastUpgradeCheck is not a string".to_string())?;
            Some(text.parse::<Version>().map_err(|err| err.to_string())?)
        }
    };

    let mut configurations = Vec::new();
    if let Some(list_id) = project.get("buildConfigurationList").and_then(Value::as_str) {
        let list = object(objects, list_id)?;
        let ids = list
            .get("buildConfigurations")
            .and_then(Value::as_array)
            .unwrap_or_default();
        for id in ids {
            let id = id
                .as_str()
                .ok_or_else(|| "buildConfigurations holds a non-reference".to_string())?;
            let config = object(objects, id)?;
            let name = config.get("name").and_then(Value::as_str).unwrap_or_default();
            let mut configuration = Configuration::new(id, name);
            if let Some(settings) = config.get("buildSettings").and_then(Value::as_dict) {
                configuration.settings = settings.clone();
            }
            configurations.push(configuration);
        }
    }

    Ok(Project {
        recorded_version,
        configurations,
        document,
    })
}

/// Writes the project's recorded version and settings back into `document`.
fn apply_project(document: &mut Document, project: &Project) -> Result<(), String> {
    let root_id = root_object_id(&document.root)?.to_string();
    let objects = document
        .root
        .as_dict_mut()
        .and_then(|root| root.get_mut("objects"))
        .and_then(Value::as_dict_mut)
        .ok_or_else(|| "missing objects table".to_string())?;

    if let Some(version) = project.recorded_version {
        let pbx_project = objects
            .get_mut(&root_id)
            .and_then(Value::as_dict_mut)
            .ok_or_else(|| format!("dangling object reference {root_id}"))?;
        if !pbx_project.contains_key("attributes") {
            pbx_project.insert("attributes", Value::Dict(Dict::new()));
        }
        if let Some(attributes) = pbx_project.get_mut("attributes").and_then(Value::as_dict_mut) {
            attributes.insert("LastUpgradeCheck", Value::String(version.to_string()));
        }
    }

    for configuration in &project.configurations {
        let config = objects
            .get_mut(&configuration.id)
            .and_then(Value::as_dict_mut)
            .ok_or_else(|| format!("dangling object reference {}", configuration.id))?;
        config.insert_before(
            "name",
            "buildSettings",
            Value::Dict(configuration.settings.clone()),
        );
    }
    Ok(())
}
