use pyo3::{exceptions::PyValueError, prelude::*};

use crate::actions::core::registry::ActionRegistry;
use crate::dice::ScriptedDice;
use crate::model::action::Action;
use crate::model::game::GameState;
use serde_json::json;

#[pyfunction]
fn get_actions(state: &str) -> PyResult<String> {
    let game_state = GameState::from_json(state)
        .map_err(|e| PyValueError::new_err(format!("Invalid game state provided: {e}")))?;
    let actions = ActionRegistry::new().available_actions(&game_state);
    // Return a standardized JSON object: { "actions": [...] }
    let wrapper = json!({"actions": actions});
    serde_json::to_string(&wrapper).map_err(|e| PyValueError::new_err(format!("{e}")))
}

/// Resolves one action with the given die results, in the order the engine asks for them.
#[pyfunction]
fn resolve_action(state: &str, action: &str, rolls: Vec<u8>) -> PyResult<String> {
    let game_state = GameState::from_json(state)
        .map_err(|e| PyValueError::new_err(format!("Invalid game state provided: {e}")))?;
    let action: Action = serde_json::from_str(action)
        .map_err(|e| PyValueError::new_err(format!("Invalid action provided: {e}")))?;
    let mut dice = ScriptedDice::new(rolls);
    let result = ActionRegistry::new()
        .resolve(&game_state, &action, &mut dice)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    serde_json::to_string(&result).map_err(|e| PyValueError::new_err(format!("{e}")))
}

/// A Python module implemented in Rust.
#[pymodule]
fn dicebowl_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(get_actions, m)?)?;
    m.add_function(wrap_pyfunction!(resolve_action, m)?)?;
    Ok(())
}
