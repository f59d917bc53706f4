//! Remote operation names.
//!
//! Wire names of the operations the registry service exposes. The client
//! dispatches every call through one of these; endpoint implementations
//! match on them.

/// Authenticate and obtain a session token.
pub const LOGIN: &str = "login";

/// Invalidate the current session token.
pub const LOGOUT: &str = "logout";

/// Create a new URN under a series and bind it to a target URL.
pub const CREATE_URN: &str = "createURN";

/// Register a caller-supplied URN and bind it to a target URL.
pub const REGISTER_URN: &str = "registerURN";

/// Reserve a caller-supplied URN without binding any targets.
pub const RESERVE_URN: &str = "reserveURN";

/// Create and reserve the next URN of a series, unbound.
pub const RESERVE_NEXT_URN: &str = "reserveNextURN";

/// Peek the next available URN of a series without storing it.
pub const GET_NEXT_URN: &str = "getNextURN";

/// Bind an additional target URL to a URN.
pub const ADD_URL: &str = "addURL";

/// Replace one target URL of a URN with another.
pub const REPLACE_URL: &str = "replaceURL";

/// Remove a target URL from a URN.
pub const DELETE_URL: &str = "deleteURL";

/// Mark one registered target URL as the URN's default.
pub const SET_DEFAULT_URL: &str = "setDefaultURL";

/// Look up a URN and all information registered for it.
pub const FIND_URN: &str = "findURN";

/// Look up every URN bound to a target URL.
pub const FIND_URNS_FOR_URL: &str = "findURNsForURL";

/// Retrieve all series visible to the session. Unimplemented server-side.
pub const GET_ALL_URN_SERIES: &str = "getAllURNSeries";

/// Report the service API version. Unimplemented server-side.
pub const GET_VERSION: &str = "getVersion";
