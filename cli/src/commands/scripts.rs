use colored::*;

use crate::terminal::{colors, print};
use mmcollect_common::config::Config;
use mmcollect_plugins::{Script, ScriptKind};

pub fn scripts(cfg: &Config) {
    print::header("available scripts", cfg.quiet);

    for (idx, kind) in ScriptKind::ALL.into_iter().enumerate() {
        let script: Box<dyn Script> = kind.script();
        if cfg.quiet > 1 {
            print::print(kind.name());
            continue;
        }

        print::tree_head(idx, kind.name());
        let mut details: Vec<(String, ColoredString)> = vec![(
            "About".to_string(),
            script.description().color(colors::TEXT_DEFAULT),
        )];
        for command in script.commands() {
            details.push(("Collects".to_string(), command.color(colors::FLOW)));
        }
        print::as_tree_one_level(details);
    }
}
