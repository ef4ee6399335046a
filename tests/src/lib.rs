//! End-to-end checks of the diagnosis pipeline, from raw controller output
//! to the report lines, with scripted or mocked controllers.

pub mod util;

#[cfg(test)]
mod pipeline;
#[cfg(test)]
mod rest;
#[cfg(test)]
mod scripts;
