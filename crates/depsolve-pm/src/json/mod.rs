//! Loading and writing the JSON documents the planner exchanges.

mod loader;

pub use loader::{
    load_catalog, load_initial_state, load_plan, load_request, load_string_list, parse_catalog,
    parse_initial_state, parse_plan, parse_request, parse_string_list, plan_to_json,
};
