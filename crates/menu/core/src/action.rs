//! Action contract - externally-decoded click and lifecycle commands.
//!
//! The core does not own action variants. The host game supplies an
//! [`ActionDecoder`] that turns raw command strings (a bracket-delimited
//! target tag followed by a command body, e.g. `[console] give %player% map`)
//! into opaque executable units. The core owns only the parsing contract:
//! a string with no recognized target prefix is retried once as an implicit
//! player-targeted command.

use std::fmt::Debug;
use std::sync::Arc;

use crate::context::MenuContext;

/// Target tag prepended to command strings that carry no explicit target.
pub const DEFAULT_TARGET_TAG: &str = "[player]";

/// One executable unit triggered by a click or menu lifecycle event.
///
/// Execution has host-game side effects (command dispatch, menu close, ...)
/// and is entirely the host's responsibility.
pub trait MenuAction: Debug + Send + Sync {
    /// Performs the action for the acting viewer.
    fn execute(&self, ctx: &dyn MenuContext);
}

/// Shared handle to a decoded action; menus are immutable once built, so
/// actions are freely shared across registry snapshots.
pub type Action = Arc<dyn MenuAction>;

/// Decodes raw command strings into host actions.
pub trait ActionDecoder {
    /// Returns the decoded action, or `None` when the string is not a
    /// recognizable command (including an unknown target prefix).
    fn decode(&self, raw: &str) -> Option<Action>;
}

/// Decodes one action string, applying the implicit-player-target rule.
///
/// If the decoder rejects a string that does not begin with a bracketed
/// target prefix, the decode is retried once with [`DEFAULT_TARGET_TAG`]
/// prepended. Returns `None` when both attempts fail; callers drop such
/// strings silently.
pub fn decode_action(decoder: &dyn ActionDecoder, raw: &str) -> Option<Action> {
    if let Some(action) = decoder.decode(raw) {
        return Some(action);
    }
    if raw.trim_start().starts_with('[') {
        return None;
    }
    decoder.decode(&format!("{DEFAULT_TARGET_TAG} {raw}"))
}

/// Runs a decoded action list in order for the acting viewer.
pub fn run_actions(actions: &[Action], ctx: &dyn MenuContext) {
    for action in actions {
        action.execute(ctx);
    }
}
