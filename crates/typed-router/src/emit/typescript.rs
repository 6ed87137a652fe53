/// TypeScript declaration emitter
///
/// Produces a `.d.ts` module: closed unions of route literals, template
/// literal types that check concrete paths positionally against their
/// pattern, a `RouteParams` map and the helper types the navigation
/// functions are declared with.
use crate::contract::{Contracts, ParamKind, ParamSpec};
use crate::route::{RoutePattern, SegmentDescriptor};
use crate::tree::RouteTree;

use super::Emitter;

const HELPERS: &str = r#"  type SearchOrHash = `?${string}` | `#${string}`;
  type RelativePathString = `./${string}` | `../${string}` | "." | "..";
  type ExternalPathString = `${string}:${string}` | `//${string}`;

  type SingleRoutePart<S extends string> = S extends `${string}/${string}`
    ? never
    : S extends `${string}${SearchOrHash}`
    ? never
    : S extends ""
    ? never
    : S;

  type CatchAllRoutePart<S extends string> = S extends `${string}${SearchOrHash}`
    ? never
    : S extends ""
    ? never
    : S;

  type StringParams<P> = { [K in keyof P as P[K] extends string ? K : never]: P[K] };
  type Split<S extends string> = S extends `${infer Head}/${infer Rest}` ? [Head, ...Split<Rest>] : [S];

  export type AllRoutes = StaticRoutes | DynamicRouteTemplate;

  type StaticHrefObject = { pathname: StaticRoutes; params?: Record<string, never> };
  type DynamicHrefObject = {
    [P in DynamicRouteTemplate]: {} extends RouteParams[P]
      ? { pathname: P; params?: RouteParams[P] }
      : { pathname: P; params: RouteParams[P] };
  }[DynamicRouteTemplate];

  export type Href<T extends string = string> =
    | StaticRoutes
    | RelativePathString
    | ExternalPathString
    | DynamicRoutes<T>
    | StaticHrefObject
    | DynamicHrefObject;

  export type SearchParams<T extends AllRoutes> = T extends DynamicRouteTemplate
    ? StringParams<RouteParams[T]>
    : Record<string, never>;

  export type Segments<T extends AllRoutes> = T extends "/"
    ? []
    : T extends `/${infer Rest}`
    ? Split<Rest>
    : never;

  export function useSearchParams<T extends AllRoutes>(): SearchParams<T>;
  export function useSearchParams<T extends Record<string, string>>(): T;
  export function useGlobalSearchParams<T extends AllRoutes>(): SearchParams<T>;
  export function useGlobalSearchParams<T extends Record<string, string>>(): T;
  export function useSegments<T extends AllRoutes>(): Segments<T>;
  export function useSegments<T extends string[]>(): T;

  export interface Router {
    push<T extends string>(href: Href<T>): void;
    replace<T extends string>(href: Href<T>): void;
  }

  export function useRouter(): Router;
"#;

/// Emits `declare module "<module_name>"` declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScriptEmitter {
    module_name: String,
}

impl TypeScriptEmitter {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
        }
    }
}

impl Default for TypeScriptEmitter {
    fn default() -> Self {
        Self::new("router")
    }
}

impl Emitter for TypeScriptEmitter {
    fn emit(&self, tree: &RouteTree, contracts: &Contracts) -> String {
        let mut statics = Vec::new();
        let mut templates = Vec::new();
        let mut dynamics = Vec::new();
        let mut params = Vec::new();

        for (_, pattern) in tree.routes() {
            let pathname = pattern.pathname();
            if !pattern.is_dynamic() {
                statics.push(format!("`{}`", escape_template(&pathname)));
                continue;
            }

            templates.push(format!("`{}`", escape_template(&pathname)));
            dynamics.extend(placeholders(pattern));

            let shape = contracts
                .get(&pathname)
                .map(|contract| param_shape(&contract.params))
                .unwrap_or_else(|| "Record<string, never>".to_string());
            params.push(format!("    {}: {};\n", quote(&pathname), shape));
        }

        let mut out = String::new();
        out.push_str("/* eslint-disable */\n");
        out.push_str("// Generated by typed-router. Do not edit.\n");
        out.push_str(&format!("declare module {} {{\n", quote(&self.module_name)));
        out.push_str(&union("StaticRoutes", &statics));
        out.push_str(&union("DynamicRouteTemplate", &templates));
        out.push_str(&union("DynamicRoutes<T extends string>", &dynamics));
        out.push('\n');

        out.push_str("  export type RouteParams = {\n");
        for line in &params {
            out.push_str(line);
        }
        out.push_str("  };\n\n");

        out.push_str(HELPERS);
        out.push_str("}\n");
        out
    }

    fn extension(&self) -> &'static str {
        "d.ts"
    }
}

fn union(name: &str, members: &[String]) -> String {
    if members.is_empty() {
        return format!("  type {name} = never;\n");
    }

    let mut out = format!("  type {name} =\n");
    for member in members {
        out.push_str(&format!("    | {member}\n"));
    }
    // Replace the trailing newline of the last member with the terminator
    out.pop();
    out.push_str(";\n");
    out
}

/// Template literal types accepting concrete paths for `pattern`
///
/// An optional catch-all contributes two members: the bare prefix and the
/// prefix followed by one or more segments.
fn placeholders(pattern: &RoutePattern) -> Vec<String> {
    let mut prefix = String::new();

    for segment in pattern.segments() {
        match segment {
            SegmentDescriptor::Static(text) => {
                prefix.push('/');
                prefix.push_str(&escape_template(text));
            }
            SegmentDescriptor::Dynamic(_) => prefix.push_str("/${SingleRoutePart<T>}"),
            SegmentDescriptor::CatchAll(_) => prefix.push_str("/${CatchAllRoutePart<T>}"),
            SegmentDescriptor::OptionalCatchAll(_) => {
                let bare = if prefix.is_empty() { "/" } else { prefix.as_str() };
                return vec![
                    format!("`{bare}`"),
                    format!("`{prefix}/${{CatchAllRoutePart<T>}}`"),
                ];
            }
            SegmentDescriptor::Group(_) => {}
        }
    }

    vec![format!("`{prefix}`")]
}

fn param_shape(params: &[ParamSpec]) -> String {
    if params.is_empty() {
        return "Record<string, never>".to_string();
    }

    let fields: Vec<String> = params
        .iter()
        .map(|spec| {
            let ty = match spec.kind {
                ParamKind::Single => "string",
                ParamKind::CatchAllArray => "string[]",
            };
            let marker = if spec.optional { "?" } else { "" };
            format!("{}{marker}: {ty}", quote(&spec.name))
        })
        .collect();

    format!("{{ {} }}", fields.join("; "))
}

/// Double-quoted TypeScript string literal
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Text safe to place between backticks verbatim
fn escape_template(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::contract::derive;

    fn emit(paths: &[&str]) -> String {
        let tree = RouteTree::from_paths(paths).unwrap();
        TypeScriptEmitter::default().emit(&tree, &derive(&tree))
    }

    #[test]
    fn test_unions() {
        let out = emit(&["/", "/apple", "/(shop)/colors/[color]"]);
        assert!(out.contains("  type StaticRoutes =\n    | `/`\n    | `/apple`;\n"));
        assert!(out.contains("  type DynamicRouteTemplate =\n    | `/colors/[color]`;\n"));
        assert!(out.contains(
            "  type DynamicRoutes<T extends string> =\n    | `/colors/${SingleRoutePart<T>}`;\n"
        ));
    }

    #[test]
    fn test_route_params_shapes() {
        let out = emit(&[
            "/colors/[color]",
            "/files/[...parts]",
            "/docs/[version]/[[...slug]]",
        ]);
        assert!(out.contains(r#"    "/colors/[color]": { "color": string };"#));
        assert!(out.contains(r#"    "/files/[...parts]": { "parts": string[] };"#));
        assert!(out.contains(
            r#"    "/docs/[version]/[[...slug]]": { "version": string; "slug"?: string[] };"#
        ));
    }

    #[test]
    fn test_optional_catch_all_placeholders() {
        let out = emit(&["/docs/[[...slug]]"]);
        assert!(out.contains("    | `/docs`\n    | `/docs/${CatchAllRoutePart<T>}`;"));

        let out = emit(&["/[[...all]]"]);
        assert!(out.contains("    | `/`\n    | `/${CatchAllRoutePart<T>}`;"));
    }

    #[test]
    fn test_params_key_optional_when_every_param_is() {
        let out = emit(&["/docs/[[...slug]]", "/colors/[color]"]);
        assert!(out.contains(r#"    "/docs/[[...slug]]": { "slug"?: string[] };"#));
        assert!(out.contains(
            "    [P in DynamicRouteTemplate]: {} extends RouteParams[P]\n      \
             ? { pathname: P; params?: RouteParams[P] }\n      \
             : { pathname: P; params: RouteParams[P] };\n"
        ));
    }

    #[test]
    fn test_reader_overloads() {
        let out = emit(&["/apple"]);
        for line in [
            "export function useSearchParams<T extends Record<string, string>>(): T;",
            "export function useGlobalSearchParams<T extends Record<string, string>>(): T;",
            "export function useSegments<T extends string[]>(): T;",
        ] {
            assert!(out.contains(line), "{line}");
        }
    }

    #[test]
    fn test_empty_tree() {
        let out = emit(&[]);
        assert!(out.contains("  type StaticRoutes = never;\n"));
        assert!(out.contains("  type DynamicRouteTemplate = never;\n"));
        assert!(out.contains("  export type RouteParams = {\n  };\n"));
    }

    #[test]
    fn test_module_name_is_quoted() {
        let tree = RouteTree::from_paths(["/apple"]).unwrap();
        let out = TypeScriptEmitter::new("expo-router").emit(&tree, &derive(&tree));
        assert!(out.contains("declare module \"expo-router\" {\n"));
    }

    #[test]
    fn test_escaping() {
        assert_eq!(quote("a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(escape_template("a`b${c}"), "a\\`b\\${c}");
    }

    #[test]
    fn test_deterministic_regardless_of_declaration_order() {
        let a = emit(&["/zebra", "/apple", "/colors/[color]"]);
        let b = emit(&["/colors/[color]", "/apple", "/zebra"]);
        assert_eq!(a, b);
    }
}
