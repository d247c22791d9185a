//! Output formatting module for eapictl
//!
//! Provides colored human output and JSON output for scripting.

use colored::Colorize;
use eapictl::resources::VlanConfig;
use indexmap::IndexMap;
use serde::Serialize;

/// Output formatter for different output modes
pub struct OutputFormatter {
    /// Use colored output
    use_color: bool,
    /// JSON output mode
    json_mode: bool,
    /// Verbosity level
    verbosity: u8,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(use_color: bool, json_mode: bool, verbosity: u8) -> Self {
        // Respect NO_COLOR environment variable
        let use_color = use_color && std::env::var("NO_COLOR").is_err();

        Self {
            use_color,
            json_mode,
            verbosity,
        }
    }

    /// Whether JSON output was requested
    pub fn is_json(&self) -> bool {
        self.json_mode
    }

    /// Print a value as pretty JSON on stdout
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{}", text),
            Err(e) => self.error(&format!("Failed to serialize output: {}", e)),
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.json_mode {
            let err = serde_json::json!({
                "type": "error",
                "message": message
            });
            eprintln!("{}", err);
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "ERROR:".red().bold(), message);
        } else {
            eprintln!("ERROR: {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.json_mode {
            let warn = serde_json::json!({
                "type": "warning",
                "message": message
            });
            eprintln!("{}", warn);
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "WARNING:".yellow().bold(), message);
        } else {
            eprintln!("WARNING: {}", message);
        }
    }

    /// Print an info message (shown with -v)
    pub fn info(&self, message: &str) {
        if self.verbosity < 1 || self.json_mode {
            return;
        }

        if self.use_color {
            println!("{} {}", "INFO:".blue(), message);
        } else {
            println!("INFO: {}", message);
        }
    }

    /// Report a successful change
    pub fn changed(&self, message: &str) {
        if self.json_mode {
            let ok = serde_json::json!({
                "type": "changed",
                "message": message
            });
            println!("{}", ok);
            return;
        }

        if self.use_color {
            println!("{} {}", "changed:".yellow(), message);
        } else {
            println!("changed: {}", message);
        }
    }

    /// Print one VLAN
    pub fn vlan(&self, vlan: &VlanConfig) {
        if self.json_mode {
            self.json(vlan);
            return;
        }

        let attributes = vlan.attributes();
        let width = attributes.keys().map(String::len).max().unwrap_or(0);
        for (key, value) in &attributes {
            let label = format!("{:width$}", key, width = width);
            if self.use_color {
                println!("{}  {}", label.cyan(), value);
            } else {
                println!("{}  {}", label, value);
            }
        }
    }

    /// Print a table of VLANs
    pub fn vlans(&self, vlans: &IndexMap<String, VlanConfig>) {
        if self.json_mode {
            self.json(vlans);
            return;
        }

        let header = format!("{:<6} {:<32} {:<8} {}", "VLAN", "NAME", "STATE", "TRUNK GROUPS");
        if self.use_color {
            println!("{}", header.bold());
        } else {
            println!("{}", header);
        }
        for (id, vlan) in vlans {
            let attributes = vlan.attributes();
            println!(
                "{:<6} {:<32} {:<8} {}",
                id, attributes["name"], attributes["state"], attributes["trunk_groups"]
            );
        }
    }

    /// Print raw configuration text
    pub fn text(&self, text: &str) {
        if self.json_mode {
            self.json(text);
        } else {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
    }

    /// Print a list of strings, one per line
    pub fn list(&self, items: &[String]) {
        if self.json_mode {
            self.json(items);
        } else {
            for item in items {
                println!("{}", item);
            }
        }
    }
}
