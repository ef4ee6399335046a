//! Sessions between two local clients installed with a next hop.
//!
//! Such entries keep the clients from talking to each other until their user
//! entries are dropped, so every client address involved gets an
//! `aaa_user_delete`. Addresses of the controller itself are left alone.

use mmcollect_core::dispatcher::DispatchPolicy;
use mmcollect_core::parser::FlowMarker;

use super::SHOW_INTERFACES;
use crate::{Script, ScriptKind};

pub struct WrongNextHop;

impl Script for WrongNextHop {
    fn kind(&self) -> ScriptKind {
        ScriptKind::WrongNextHop
    }

    fn description(&self) -> &'static str {
        "Drop the users of local sessions forwarded through a next hop"
    }

    fn commands(&self) -> &'static [&'static str] {
        &[SHOW_INTERFACES, "show datapath session table"]
    }

    fn marker(&self) -> FlowMarker {
        FlowMarker::next_hop()
    }

    fn policy(&self) -> DispatchPolicy {
        DispatchPolicy::user_delete()
    }
}
