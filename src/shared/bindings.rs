//! TypeScript declarations for the JavaScript side of the host bridge.

use ts_rs::TS;

use crate::host::HeaderControl;
use crate::shared::settings::{SettingDefinition, SettingScope};
use crate::shared::types::Provenance;

/// All bridge-facing declarations, one `export type` per line.
pub fn typescript_bindings() -> String {
    [
        Provenance::decl(),
        SettingScope::decl(),
        SettingDefinition::decl(),
        HeaderControl::decl(),
    ]
    .iter()
    .map(|decl| format!("export {}\n", decl))
    .collect()
}
