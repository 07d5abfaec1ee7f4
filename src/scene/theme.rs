use crate::foundation::error::{DinoError, DinoResult};
use crate::scene::stencil::Part;

/// Activity levels per palette (level 0 = no activity, 4 = top decile).
pub const PALETTE_LEVELS: usize = 5;

/// Named theme selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeKind {
    Light,
    Dark,
}

impl ThemeKind {
    pub fn name(self) -> &'static str {
        match self {
            ThemeKind::Light => "light",
            ThemeKind::Dark => "dark",
        }
    }

    pub const ALL: [ThemeKind; 2] = [ThemeKind::Light, ThemeKind::Dark];
}

/// Color configuration for one theme: document colors plus an ordered
/// five-color palette per part, indexed by activity level.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub kind: ThemeKind,
    /// Background gradient, top then bottom stop.
    pub background: [&'static str; 2],
    pub text: &'static str,
    pub grid_line: &'static str,
    pub empty_cell: &'static str,
    dino: [&'static str; PALETTE_LEVELS],
    spikes: [&'static str; PALETTE_LEVELS],
    cactus: [&'static str; PALETTE_LEVELS],
    meteor: [&'static str; PALETTE_LEVELS],
    roar: [&'static str; PALETTE_LEVELS],
    trail: [&'static str; PALETTE_LEVELS],
    ground: [&'static str; PALETTE_LEVELS],
}

impl Theme {
    pub fn get(kind: ThemeKind) -> &'static Theme {
        match kind {
            ThemeKind::Light => &LIGHT,
            ThemeKind::Dark => &DARK,
        }
    }

    /// The five-color palette for `part`. Legs share the dino palette.
    pub fn palette(&self, part: Part) -> [&'static str; PALETTE_LEVELS] {
        match part {
            Part::Dino | Part::LegsA | Part::LegsB => self.dino,
            Part::Spikes => self.spikes,
            Part::Cactus => self.cactus,
            Part::Meteor => self.meteor,
            Part::Roar => self.roar,
            Part::Trail => self.trail,
            Part::Ground => self.ground,
        }
    }
}

/// GitHub-flavored light theme.
pub static LIGHT: Theme = Theme {
    kind: ThemeKind::Light,
    background: ["#ffffff", "#f6f8fa"],
    text: "#24292f",
    grid_line: "#d0d7de",
    empty_cell: "#ebedf0",
    dino: ["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"],
    spikes: ["#ebedf0", "#ace7ae", "#54d267", "#2da44e", "#1a7f37"],
    cactus: ["#ebedf0", "#b4e6b4", "#6fdd8b", "#4ac26b", "#2da44e"],
    meteor: ["#ffebe9", "#ffaba8", "#ff8182", "#fa4549", "#cf222e"],
    roar: ["#fff1e5", "#ffd8b5", "#ffb77c", "#fb8f44", "#e16f24"],
    trail: ["#f6f8fa", "#d8dee4", "#afb8c1", "#8c959f", "#6e7781"],
    ground: ["#f6f8fa", "#eddeb3", "#d4a72c", "#bf8700", "#953800"],
};

/// GitHub-flavored dark theme.
pub static DARK: Theme = Theme {
    kind: ThemeKind::Dark,
    background: ["#0d1117", "#161b22"],
    text: "#c9d1d9",
    grid_line: "#21262d",
    empty_cell: "#161b22",
    dino: ["#1b2a1f", "#0e4429", "#006d32", "#26a641", "#39d353"],
    spikes: ["#203227", "#0f5132", "#1a7f37", "#2ea043", "#56d364"],
    cactus: ["#16261d", "#033a16", "#0f5323", "#1f6f35", "#2ea043"],
    meteor: ["#2d1214", "#67060c", "#a0111f", "#d1242f", "#ff6a69"],
    roar: ["#2b1a0e", "#762d0a", "#9b4215", "#bc4c00", "#fb8f44"],
    trail: ["#161b22", "#1f2937", "#30363d", "#484f58", "#6e7681"],
    ground: ["#1c1710", "#3b2300", "#5b3a10", "#7d4e1d", "#9e6a03"],
};

/// Parse a `#rrggbb` color into RGB bytes.
pub fn parse_hex(color: &str) -> DinoResult<[u8; 3]> {
    let hex = color
        .strip_prefix('#')
        .ok_or_else(|| DinoError::validation(format!("color '{color}' is missing '#'")))?;
    if hex.len() != 6 {
        return Err(DinoError::validation(format!(
            "color '{color}' is not #rrggbb"
        )));
    }
    let byte = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| DinoError::validation(format!("color '{color}' has non-hex digits")))
    };
    Ok([byte(0..2)?, byte(2..4)?, byte(4..6)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_round_trips_known_colors() {
        assert_eq!(parse_hex("#000000").unwrap(), [0, 0, 0]);
        assert_eq!(parse_hex("#39d353").unwrap(), [0x39, 0xd3, 0x53]);
        assert!(parse_hex("39d353").is_err());
        assert!(parse_hex("#39d35").is_err());
        assert!(parse_hex("#39d35g").is_err());
    }

    #[test]
    fn every_palette_color_parses() {
        for kind in ThemeKind::ALL {
            let theme = Theme::get(kind);
            parse_hex(theme.background[0]).unwrap();
            parse_hex(theme.background[1]).unwrap();
            parse_hex(theme.text).unwrap();
            parse_hex(theme.grid_line).unwrap();
            parse_hex(theme.empty_cell).unwrap();
            for part in Part::ALL {
                for color in theme.palette(part) {
                    parse_hex(color).unwrap();
                }
            }
        }
    }

    #[test]
    fn legs_share_the_dino_palette() {
        let theme = Theme::get(ThemeKind::Dark);
        assert_eq!(theme.palette(Part::LegsA), theme.palette(Part::Dino));
        assert_eq!(theme.palette(Part::LegsB), theme.palette(Part::Dino));
    }
}
