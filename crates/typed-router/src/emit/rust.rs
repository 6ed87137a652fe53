/// Rust module emitter
///
/// Generates a `RouteId` enum and one params struct per route implementing
/// `TypedRoute`, so navigating to an undeclared route or reading the wrong
/// params fails to compile. Identifiers are derived from the canonical
/// pathname; clashes get a numeric suffix in pathname order, which keeps
/// them stable across runs.
use std::collections::HashSet;

use crate::contract::{Contracts, ParamContract, ParamKind, ParamSpec};
use crate::route::SegmentDescriptor;
use crate::tree::RouteTree;

use super::Emitter;

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "static", "struct", "trait", "true", "try", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv", "typeof",
    "unsized", "virtual", "yield",
];

/// Names that cannot be raw identifiers
const RESERVED: &[&str] = &["self", "super", "crate", "_"];

/// Emits a self-contained Rust module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RustEmitter {
    crate_path: String,
}

impl RustEmitter {
    pub fn new(crate_path: impl Into<String>) -> Self {
        Self {
            crate_path: crate_path.into(),
        }
    }
}

impl Default for RustEmitter {
    fn default() -> Self {
        Self::new("::typed_router")
    }
}

struct Route<'a> {
    ident: String,
    contract: &'a ParamContract,
    fields: Vec<(String, &'a ParamSpec)>,
}

impl Emitter for RustEmitter {
    fn emit(&self, tree: &RouteTree, contracts: &Contracts) -> String {
        let mut taken: HashSet<String> = HashSet::from(["RouteId".to_string()]);

        let routes: Vec<Route<'_>> = tree
            .routes()
            .filter_map(|(_, pattern)| contracts.get(&pattern.pathname()))
            .map(|contract| {
                let ident = unique(type_ident(contract), &mut taken);
                let mut field_names = HashSet::new();
                let fields = contract
                    .params
                    .iter()
                    .map(|spec| (unique(field_ident(&spec.name), &mut field_names), spec))
                    .collect();
                Route {
                    ident,
                    contract,
                    fields,
                }
            })
            .collect();

        let krate = self.crate_path.as_str();
        let mut out = String::new();
        out.push_str("// @generated by typed-router. Do not edit.\n\n");

        out.push_str("/// Every declared route\n");
        out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]\n");
        out.push_str("pub enum RouteId {\n");
        for route in &routes {
            out.push_str(&format!("    /// `{}`\n", route.contract.route));
            out.push_str(&format!("    {},\n", route.ident));
        }
        out.push_str("}\n\n");

        out.push_str("impl RouteId {\n");
        out.push_str("    pub const ALL: &'static [RouteId] = &[\n");
        for route in &routes {
            out.push_str(&format!("        RouteId::{},\n", route.ident));
        }
        out.push_str("    ];\n\n");

        out.push_str("    /// Canonical pathname\n");
        out.push_str("    pub fn pathname(self) -> &'static str {\n");
        if routes.is_empty() {
            out.push_str("        match self {}\n");
        } else {
            out.push_str("        match self {\n");
            for route in &routes {
                out.push_str(&format!(
                    "            RouteId::{} => {:?},\n",
                    route.ident, route.contract.pathname
                ));
            }
            out.push_str("        }\n");
        }
        out.push_str("    }\n\n");

        out.push_str("    pub fn from_pathname(pathname: &str) -> ::std::option::Option<Self> {\n");
        out.push_str("        match pathname {\n");
        for route in &routes {
            out.push_str(&format!(
                "            {:?} => ::std::option::Option::Some(RouteId::{}),\n",
                route.contract.pathname, route.ident
            ));
        }
        out.push_str("            _ => ::std::option::Option::None,\n");
        out.push_str("        }\n");
        out.push_str("    }\n");
        out.push_str("}\n\n");

        out.push_str("/// Route, canonical pathname and parameter names, ordered by pathname\n");
        out.push_str("pub const ROUTES: &[(RouteId, &str, &[&str])] = &[\n");
        for route in &routes {
            let names: Vec<String> = route
                .contract
                .params
                .iter()
                .map(|spec| format!("{:?}", spec.name))
                .collect();
            out.push_str(&format!(
                "    (RouteId::{}, {:?}, &[{}]),\n",
                route.ident,
                route.contract.pathname,
                names.join(", ")
            ));
        }
        out.push_str("];\n");

        for route in &routes {
            out.push('\n');
            out.push_str(&params_struct(route, krate));
        }

        out
    }

    fn extension(&self) -> &'static str {
        "rs"
    }
}

fn params_struct(route: &Route<'_>, krate: &str) -> String {
    let ident = &route.ident;
    let mut out = format!("/// Params of `{}`\n", route.contract.route);
    out.push_str("#[derive(Debug, Clone, PartialEq, Eq)]\n");

    if route.fields.is_empty() {
        out.push_str(&format!("pub struct {ident};\n\n"));
    } else {
        out.push_str(&format!("pub struct {ident} {{\n"));
        for (field, spec) in &route.fields {
            out.push_str(&format!("    pub {field}: {},\n", field_type(spec)));
        }
        out.push_str("}\n\n");
    }

    out.push_str(&format!("impl {krate}::TypedRoute for {ident} {{\n"));
    out.push_str(&format!(
        "    const PATHNAME: &'static str = {:?};\n\n",
        route.contract.pathname
    ));

    let params_arg = if route.fields.is_empty() { "_params" } else { "params" };
    out.push_str(&format!(
        "    fn from_params({params_arg}: &{krate}::Params) -> ::std::result::Result<Self, {krate}::MatchError> {{\n"
    ));
    if route.fields.is_empty() {
        out.push_str("        ::std::result::Result::Ok(Self)\n");
    } else {
        out.push_str("        ::std::result::Result::Ok(Self {\n");
        for (field, spec) in &route.fields {
            let reader = match (spec.kind, spec.optional) {
                (ParamKind::Single, _) => "required_single",
                (ParamKind::CatchAllArray, false) => "required_multiple",
                (ParamKind::CatchAllArray, true) => "optional_multiple",
            };
            out.push_str(&format!(
                "            {field}: {krate}::navigation::{reader}(params, Self::PATHNAME, {:?})?,\n",
                spec.name
            ));
        }
        out.push_str("        })\n");
    }
    out.push_str("    }\n\n");

    out.push_str(&format!("    fn into_params(self) -> {krate}::Params {{\n"));
    if route.fields.is_empty() {
        out.push_str(&format!("        {krate}::Params::new()\n"));
    } else {
        out.push_str(&format!("        let mut params = {krate}::Params::new();\n"));
        for (field, spec) in &route.fields {
            match (spec.kind, spec.optional) {
                (ParamKind::Single, _) => out.push_str(&format!(
                    "        params.insert({:?}.into(), {krate}::ParamValue::Single(self.{field}));\n",
                    spec.name
                )),
                (ParamKind::CatchAllArray, false) => out.push_str(&format!(
                    "        params.insert({:?}.into(), {krate}::ParamValue::Multiple(self.{field}));\n",
                    spec.name
                )),
                (ParamKind::CatchAllArray, true) => out.push_str(&format!(
                    "        if let ::std::option::Option::Some(values) = self.{field} {{\n            params.insert({:?}.into(), {krate}::ParamValue::Multiple(values));\n        }}\n",
                    spec.name
                )),
            }
        }
        out.push_str("        params\n");
    }
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}

fn field_type(spec: &ParamSpec) -> &'static str {
    match (spec.kind, spec.optional) {
        (ParamKind::Single, _) => "::std::string::String",
        (ParamKind::CatchAllArray, false) => "::std::vec::Vec<::std::string::String>",
        (ParamKind::CatchAllArray, true) => {
            "::std::option::Option<::std::vec::Vec<::std::string::String>>"
        }
    }
}

/// `PascalCase` name built from the pathname's segments
fn type_ident(contract: &ParamContract) -> String {
    let mut ident = String::new();

    for segment in contract.pathname.split('/').filter(|s| !s.is_empty()) {
        let word = match crate::route::classify_segment(segment) {
            Some(SegmentDescriptor::Static(text)) => text,
            Some(descriptor) => descriptor.param_name().unwrap_or_default().to_string(),
            None => segment.to_string(),
        };
        ident.push_str(&pascal_case(&word));
    }

    if ident.is_empty() {
        ident.push_str("Root");
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, 'R');
    }
    if ident == "Self" {
        ident.push_str("Route");
    }
    ident
}

fn pascal_case(word: &str) -> String {
    word.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// `snake_case` field name; keywords become raw identifiers
fn field_ident(name: &str) -> String {
    let mut ident = String::new();
    let mut previous_lower = false;

    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if previous_lower {
                ident.push('_');
            }
            ident.push(c.to_ascii_lowercase());
            previous_lower = false;
        } else if c.is_ascii_alphanumeric() {
            ident.push(c);
            previous_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        } else {
            if !ident.ends_with('_') {
                ident.push('_');
            }
            previous_lower = false;
        }
    }

    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    if RESERVED.contains(&ident.as_str()) {
        ident.push('_');
    } else if KEYWORDS.contains(&ident.as_str()) {
        ident.insert_str(0, "r#");
    }
    ident
}

fn unique(ident: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(ident.clone()) {
        return ident;
    }

    (2..)
        .map(|n| format!("{ident}{n}"))
        .find(|candidate| taken.insert(candidate.clone()))
        .unwrap_or(ident)
}
