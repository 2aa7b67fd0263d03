//! Runtime configuration shared by the library entry points and the CLI.

use std::path::PathBuf;

pub const DEFAULT_MAP_OUTPUT: &str = "fars_map.png";
pub const DEFAULT_MAP_WIDTH: u32 = 1024;
pub const DEFAULT_MAP_HEIGHT: u32 = 768;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the `accident_<year>.csv.bz2` files.
    pub data_dir: PathBuf,
    /// Where rendered maps are written.
    pub output: PathBuf,
    pub map_width: u32,
    pub map_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_MAP_OUTPUT),
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
        }
    }
}

impl Config {
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_map_size(mut self, width: u32, height: u32) -> Self {
        self.map_width = width;
        self.map_height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_current_directory() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.output, PathBuf::from("fars_map.png"));
        assert_eq!((config.map_width, config.map_height), (1024, 768));
    }

    #[test]
    fn builders_override_fields() {
        let config = Config::default()
            .with_data_dir("/data/fars")
            .with_output("al.png")
            .with_map_size(640, 480);
        assert_eq!(config.data_dir, PathBuf::from("/data/fars"));
        assert_eq!(config.output, PathBuf::from("al.png"));
        assert_eq!((config.map_width, config.map_height), (640, 480));
    }
}
