//! Common constants used throughout the iconsmith application.

/// Supported configuration file names, tried in order
pub const CONFIG_FILES: [&str; 3] = ["build.config.json", "build.config.yml", "build.config.yaml"];

/// Default entry folder holding the SVG sources
pub const DEFAULT_ENTRY: &str = "./src";

/// Default output folder for generated components
pub const DEFAULT_OUTPUT: &str = "./dist";

/// Fill color used when the consumer passes no `color` prop
pub const DEFAULT_COLOR: &str = "#262626";

/// Appended to the component name to build the default `<title>`
pub const DEFAULT_TITLE_SUFFIX: &str = " icon";

/// Placeholder replaced by the icon tables in a readme template
pub const DEFAULT_DECLARATION_TAG: &str = "[icons-declaration]";

/// Sentinel name of the entry root among discovered folders
pub const ROOT_FOLDER: &str = ".";

/// Extension of the icon sources
pub const SVG_EXTENSION: &str = ".svg";

/// File name of the barrel module written per folder
pub const INDEX_FILE: &str = "index.ts";

/// Default formatter executable
pub const DEFAULT_FORMATTER: &str = "prettier";

/// Default declaration compiler executable
pub const DEFAULT_COMPILER: &str = "tsc";
