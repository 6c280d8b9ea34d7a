/// Registry subkeys (relative to `SOFTWARE\`) written by every known client
/// installer, from the original Origin releases up to the EA classic client.
///
/// Scanned in declaration order; see [`Resolver`](crate::Resolver) for how
/// multiple hits are settled.
pub const KNOWN_REGKEYS: &[&str] = &[
    r"Origin Worlds Online\Ultima Online\KR Legacy Beta",
    r"EA Games\Ultima Online: Mondain's Legacy\1.00.0000",
    r"Origin Worlds Online\Ultima Online\1.0",
    r"Origin Worlds Online\Ultima Online Third Dawn\1.0",
    r"EA GAMES\Ultima Online Samurai Empire",
    r"EA Games\Ultima Online: Mondain's Legacy",
    r"EA GAMES\Ultima Online Samurai Empire\1.0",
    r"EA GAMES\Ultima Online Samurai Empire\1.00.0000",
    r"EA GAMES\Ultima Online: Samurai Empire\1.0",
    r"EA GAMES\Ultima Online: Samurai Empire\1.00.0000",
    r"EA Games\Ultima Online: Mondain's Legacy\1.0",
    r"EA Games\Ultima Online: Mondain's Legacy\1.00.0000",
    r"Origin Worlds Online\Ultima Online Samurai Empire BETA\2d\1.0",
    r"Origin Worlds Online\Ultima Online Samurai Empire BETA\3d\1.0",
    r"Origin Worlds Online\Ultima Online Samurai Empire\2d\1.0",
    r"Origin Worlds Online\Ultima Online Samurai Empire\3d\1.0",
    r"Electronic Arts\EA Games\Ultima Online Stygian Abyss Classic",
    r"Electronic Arts\EA Games\Ultima Online Classic",
    r"Electronic Arts\EA Games\",
];
