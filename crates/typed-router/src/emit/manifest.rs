/// JSON route manifest
use serde_json::{json, Value};

use crate::contract::Contracts;
use crate::tree::RouteTree;

use super::Emitter;

const MANIFEST_VERSION: u32 = 1;

/// Pretty-printed JSON listing every route with its contract
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManifestEmitter;

impl ManifestEmitter {
    pub fn to_value(&self, tree: &RouteTree, contracts: &Contracts) -> Value {
        let routes: Vec<Value> = tree
            .routes()
            .map(|(_, pattern)| {
                let pathname = pattern.pathname();
                let params = contracts
                    .get(&pathname)
                    .map(|contract| json!(contract.params))
                    .unwrap_or_else(|| json!([]));

                json!({
                    "route": pattern.declared(),
                    "pathname": pathname,
                    "dynamic": pattern.is_dynamic(),
                    "segments": pathname.split('/').filter(|s| !s.is_empty()).collect::<Vec<_>>(),
                    "params": params
                })
            })
            .collect();

        json!({
            "version": MANIFEST_VERSION,
            "routes": routes
        })
    }
}

impl Emitter for ManifestEmitter {
    fn emit(&self, tree: &RouteTree, contracts: &Contracts) -> String {
        format!("{:#}\n", self.to_value(tree, contracts))
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
