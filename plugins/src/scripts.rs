pub mod uplink_redirect;
pub mod wrong_nexthop;

/// Brief listing of the controller's IP interfaces.
pub const SHOW_INTERFACES: &str = "show ip interface brief";
