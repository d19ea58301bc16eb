//! Angular data services, one per endpoint
//!
//! Each endpoint method becomes a service method issuing the matching HTTP
//! call. The verb is the declared one, else the one implied by the method
//! name prefix, else POST when a model parameter is present, else GET. For
//! verbs with a body the first model (or model collection) parameter is
//! sent as the body; every other parameter goes in the query string.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use tracing::{debug, warn};

use super::naming::{endpoint_stem, to_camel_case};
use super::templates::{import_lines, write_ts_file, DataServiceTemplateData, ServiceMethod};
use crate::config::HttpModule;
use crate::graph::{Classification, ResolvedEndpoint, ResolvedMethod, TypeMapper};
use crate::model::{HttpVerb, TypeId};

/// Verb used for a method.
pub fn infer_verb(method: &ResolvedMethod) -> HttpVerb {
    method
        .verb
        .or_else(|| HttpVerb::from_method_name(&method.name))
        .unwrap_or_else(|| {
            if method.parameters.iter().any(|p| p.ty.is_structured()) {
                HttpVerb::Post
            } else {
                HttpVerb::Get
            }
        })
}

/// `<api>/<endpoint stem>/<route or method name>`
pub fn method_url(api_path: &str, endpoint_simple_name: &str, method: &ResolvedMethod) -> String {
    let api = api_path.trim_end_matches('/');
    let route = method
        .route
        .as_deref()
        .map(|r| r.trim_matches('/'))
        .filter(|r| !r.is_empty())
        .unwrap_or(&method.name);
    let stem = endpoint_stem(endpoint_simple_name);
    if api.is_empty() {
        format!("{stem}/{route}")
    } else {
        format!("{api}/{stem}/{route}")
    }
}

fn framework_imports(http_module: HttpModule) -> Vec<String> {
    let lines: &[&str] = match http_module {
        HttpModule::Http => &[
            "import { Injectable } from '@angular/core';",
            "import { Http, Response, URLSearchParams } from '@angular/http';",
            "import { Observable } from 'rxjs/Observable';",
            "import 'rxjs/add/operator/map';",
        ],
        HttpModule::HttpClient => &[
            "import { Injectable } from '@angular/core';",
            "import { HttpClient, HttpParams } from '@angular/common/http';",
            "import { Observable } from 'rxjs/Observable';",
        ],
    };
    lines.iter().map(|l| l.to_string()).collect()
}

struct MethodBuilder<'a> {
    mapper: &'a TypeMapper<'a>,
    http_module: HttpModule,
    api_path: &'a str,
    endpoint_name: &'a str,
}

impl MethodBuilder<'_> {
    /// Service method for one endpoint method, plus the models it references.
    ///
    /// Returns `None` when the return type is ignored; ignored parameters are dropped.
    fn build(&self, method: &ResolvedMethod) -> Option<(ServiceMethod, Vec<TypeId>)> {
        let returns = match self.mapper.map(&method.returns) {
            Some(ty) => ty,
            None => {
                warn!(method = %method.name, "Skipping method returning an ignored type");
                return None;
            }
        };
        let mut referenced: Vec<TypeId> =
            method.returns.rendered_models().into_iter().cloned().collect();

        let params: Vec<(&str, String, &Classification)> = method
            .parameters
            .iter()
            .filter_map(|p| {
                let ty = self.mapper.map(&p.ty)?;
                Some((p.name.as_str(), ty, &p.ty))
            })
            .collect();
        for (_, _, classification) in &params {
            referenced.extend(classification.rendered_models().into_iter().cloned());
        }

        let verb = infer_verb(method);
        let body_index = if verb.has_body() {
            params.iter().position(|(_, _, c)| c.is_structured())
        } else {
            None
        };
        let body = body_index.map(|i| params[i].0);
        let query: Vec<&str> = params
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != body_index)
            .map(|(_, (name, _, _))| *name)
            .collect();

        let signature = params
            .iter()
            .map(|(name, ty, _)| format!("{name}: {ty}"))
            .collect::<Vec<_>>()
            .join(", ");
        let url = method_url(self.api_path, self.endpoint_name, method);

        let lines = match self.http_module {
            HttpModule::HttpClient => http_client_body(verb, &url, &returns, body, &query),
            HttpModule::Http => http_body(verb, &url, &returns, body, &query),
        };

        Some((
            ServiceMethod {
                name: to_camel_case(&method.name),
                signature,
                returns,
                body: lines,
            },
            referenced,
        ))
    }
}

fn http_client_body(
    verb: HttpVerb,
    url: &str,
    returns: &str,
    body: Option<&str>,
    query: &[&str],
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut args = vec![format!("'{url}'")];
    if verb.has_body() {
        args.push(body.unwrap_or("null").to_string());
    }
    if !query.is_empty() {
        lines.push("let params = new HttpParams();".to_string());
        for name in query {
            lines.push(format!("params = params.set('{name}', String({name}));"));
        }
        args.push("{ params: params }".to_string());
    }
    lines.push(format!(
        "return this.http.{}<{returns}>({});",
        verb.as_client_method(),
        args.join(", ")
    ));
    lines
}

fn http_body(
    verb: HttpVerb,
    url: &str,
    returns: &str,
    body: Option<&str>,
    query: &[&str],
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut args = vec![format!("'{url}'")];
    if verb.has_body() {
        args.push(body.unwrap_or("null").to_string());
    }
    if !query.is_empty() {
        lines.push("const search = new URLSearchParams();".to_string());
        for name in query {
            lines.push(format!("search.set('{name}', String({name}));"));
        }
        args.push("{ search: search }".to_string());
    }
    let map = if returns == "void" {
        ".map(() => undefined)".to_string()
    } else {
        format!(".map((res: Response) => <{returns}>res.json())")
    };
    lines.push(format!(
        "return this.http.{}({}){map};",
        verb.as_client_method(),
        args.join(", ")
    ));
    lines
}

/// Settings shared by every data service of a run
pub struct ServiceSettings<'a> {
    pub api_path: &'a str,
    pub http_module: HttpModule,
    pub combine_imports: bool,
}

/// Write one data service per endpoint; returns the generated names.
///
/// `model_names` and `service_names` hold the de-duplicated output names.
///
/// # Errors
///
/// Returns an error if a file cannot be rendered or written.
pub fn write_services(
    endpoints: &[ResolvedEndpoint],
    model_names: &HashMap<TypeId, String>,
    service_names: &HashMap<TypeId, String>,
    settings: &ServiceSettings<'_>,
    dir: &Path,
) -> anyhow::Result<Vec<String>> {
    let mapper = TypeMapper::with_names(model_names);
    let mut generated = Vec::with_capacity(endpoints.len());

    for endpoint in endpoints {
        let Some(name) = service_names.get(&endpoint.id) else {
            continue;
        };
        let builder = MethodBuilder {
            mapper: &mapper,
            http_module: settings.http_module,
            api_path: settings.api_path,
            endpoint_name: endpoint.id.simple_name(),
        };

        let mut referenced = BTreeSet::new();
        let mut methods = Vec::with_capacity(endpoint.methods.len());
        for method in &endpoint.methods {
            if let Some((built, models)) = builder.build(method) {
                referenced.extend(models.iter().map(|m| mapper.model_name(m).to_string()));
                methods.push(built);
            }
        }
        debug!(service = %name, methods = methods.len(), "Rendering data service");

        let mut imports = framework_imports(settings.http_module);
        imports.extend(import_lines(&referenced, settings.combine_imports));
        let template = DataServiceTemplateData {
            imports,
            name: name.clone(),
            http_type: match settings.http_module {
                HttpModule::Http => "Http",
                HttpModule::HttpClient => "HttpClient",
            },
            methods,
        };
        write_ts_file(dir, name, &template)?;
        generated.push(name.clone());
    }
    Ok(generated)
}
