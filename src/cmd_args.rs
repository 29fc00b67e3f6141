use std::ffi::OsString;

pub use clap::Parser;

pub const DEFAULT_SCREEN_WIDTH: f64 = 375.0;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Keyboard config file. Defaults to $FONTKEYS_CONFIG_PATH or ~/.fontkeys/keyboard.
    #[clap(short = 'c', long, help = "keyboard config file")]
    config: Option<String>,

    /// Overrides the language from the config file
    #[clap(short = 'l', long, help = "initial language (latin | cyrillic)")]
    language: Option<String>,

    #[clap(
        short = 'w',
        long,
        default_value_t = DEFAULT_SCREEN_WIDTH,
        help = "screen width in points"
    )]
    screen_width: f64,

    /// Comma-separated key labels tapped in order. A label is a key's
    /// current glyph or one of shift, backspace, mode, lang, punct, space, comma.
    #[clap(short = 't', long, default_value = "", help = "keys to tap")]
    taps: String,

    #[clap(long, help = "print the key frames of the final layout as JSON")]
    layout_json: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    config: Option<String>,
    language: Option<String>,
    screen_width: f64,
    taps: Vec<String>,
    layout_json: bool,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from(ClapArgs::parse_from(itr))
    }

    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn screen_width(&self) -> f64 {
        self.screen_width
    }

    pub fn taps(&self) -> &[String] {
        &self.taps
    }

    pub fn layout_json(&self) -> bool {
        self.layout_json
    }
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            config: args.config,
            language: args.language,
            screen_width: args.screen_width,
            taps: split_taps(&args.taps),
            layout_json: args.layout_json,
        }
    }
}

fn split_taps(taps: &str) -> Vec<String> {
    taps.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(|label| match label {
            "comma" => ",".to_string(),
            other => other.to_string(),
        })
        .collect()
}
