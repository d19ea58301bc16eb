use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use tracing::warn;

use super::naming::to_camel_case;
use super::templates::{
    import_lines, write_ts_file, EntityTemplateData, EnumMember, EnumTemplateData, PropertyLine,
};
use crate::graph::{Classifier, ModelSet, TypeMapper};
use crate::model::{ObjectModel, TypeId, TypeKind};

/// Write one definition file per model; returns the generated names.
///
/// # Errors
///
/// Returns an error if a file cannot be rendered or written.
pub fn write_entities<M: ObjectModel + ?Sized>(
    model: &M,
    models: &ModelSet,
    names: &HashMap<TypeId, String>,
    dir: &Path,
    combine_imports: bool,
) -> anyhow::Result<Vec<String>> {
    let classifier = Classifier::new(model);
    let mapper = TypeMapper::with_names(names);
    let mut generated = Vec::with_capacity(models.len());

    for id in models {
        let name = mapper.model_name(id).to_string();
        let is_enum = model.type_def(id).is_some_and(|d| d.kind == TypeKind::Enum);

        if is_enum {
            let values = model
                .type_def(id)
                .map(|d| {
                    d.values
                        .iter()
                        .map(|v| EnumMember {
                            name: v.name.clone(),
                            value: v.value,
                        })
                        .collect()
                })
                .unwrap_or_default();
            write_ts_file(dir, &name, &EnumTemplateData { name: name.clone(), values })?;
            generated.push(name);
            continue;
        }

        let mut referenced = BTreeSet::new();
        let extends = match classifier.base_model(id) {
            Some(base) => {
                let base_name = mapper.model_name(&base).to_string();
                referenced.insert(base_name.clone());
                format!(" extends {base_name}")
            }
            None => String::new(),
        };

        let properties = match model.properties(id) {
            Ok(properties) => properties
                .iter()
                .filter_map(|p| {
                    let classification = classifier.classify(&p.ty);
                    let ty = mapper.map(&classification)?;
                    referenced.extend(
                        classification
                            .rendered_models()
                            .into_iter()
                            .map(|m| mapper.model_name(m).to_string()),
                    );
                    Some(PropertyLine {
                        name: to_camel_case(&p.name),
                        ty,
                    })
                })
                .collect(),
            Err(e) => {
                warn!(type_name = %id, error = %e, "Properties could not be read, generating an empty definition");
                Vec::new()
            }
        };
        referenced.remove(&name);

        let template = EntityTemplateData {
            imports: import_lines(&referenced, combine_imports),
            name: name.clone(),
            extends,
            properties,
        };
        write_ts_file(dir, &name, &template)?;
        generated.push(name);
    }
    Ok(generated)
}
