use crate::chart::surface::Color;

const LANGUAGE_COLORS: &[(&str, u32)] = &[
    ("JavaScript", 0xf1e05a),
    ("Python", 0x3572a5),
    ("Java", 0xb07219),
    ("TypeScript", 0x2b7489),
    ("C++", 0xf34b7d),
    ("C", 0x555555),
    ("C#", 0x239120),
    ("PHP", 0x4f5d95),
    ("Ruby", 0x701516),
    ("Go", 0x00add8),
    ("Rust", 0xdea584),
    ("Swift", 0xffac45),
    ("HTML", 0xe34c26),
    ("CSS", 0x1572b6),
    ("Shell", 0x89e051),
    ("Vue", 0x4fc08d),
    ("Dart", 0x00b4ab),
    ("Scala", 0xc22d40),
    ("R", 0x198ce7),
    ("Perl", 0x0298c3),
];

pub fn language_color(language: &str) -> Option<Color> {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, rgb)| Color::hex(*rgb))
}
