//! Static token tables.

/// The generic "copy of a creature" token.
pub const GENERIC_COPY_TOKEN: &str = "a020dc47-3747-4123-9954-f0e87a858b8c";

pub const FOOD: &str = "bf36408d-ed85-497f-8e68-d3a922c388a0";
pub const TREASURE: &str = "e6fa7d35-9a7a-40fc-9b97-b479fc157ab0";
pub const POISON: &str = "470618f6-f67f-44c6-a086-285632508915";
pub const CITYS_BLESSING: &str = "ba64ed3e-93c5-406f-a38d-65cc68472122";
pub const MONARCH: &str = "40b79918-22a7-4fff-82a6-8ebfe6e87185";
pub const ENERGY: &str = "a446b9f8-cb22-408a-93ff-bee44a0dccc0";

/// Tokens shared by so many cards that they resolve by name alone.
const UNIVERSAL_TOKENS: [(&str, &str); 6] = [
  ("Food", FOOD),
  ("Treasure", TREASURE),
  ("Poison", POISON),
  ("City's Blessing", CITYS_BLESSING),
  ("Monarch", MONARCH),
  ("Energy", ENERGY),
];

/// Rules-text fragments that imply a game object without the word "token".
pub const KEYWORD_TRIGGERS: [(&str, &str); 4] = [
  ("Ascend (", CITYS_BLESSING),
  ("poison counter", POISON),
  ("you become the monarch", MONARCH),
  ("{E}", ENERGY),
];

pub fn universal_token(name: &str) -> Option<&'static str> {
  UNIVERSAL_TOKENS
    .iter()
    .find(|(n, _)| *n == name)
    .map(|(_, id)| *id)
}

/// Hand-curated token lists for cards whose linked parts or rules text
/// resolve wrongly. Keyed by exact (front face) name.
static OVERRIDES: &[(&str, &[&str])] = &[
  ("Outlaws' Merriment", &[
    "db951f76-b785-453e-91b9-b3b8a5c1cfd4",
    "cd3ca6d5-4b2c-46d4-95f3-f0f2fa47f447",
    "c994ea90-71f4-403f-9418-2b72cc2de14d",
  ]),
  ("Trostani's Summoner", &[
    "703e7ecf-3d73-40c1-8cfe-0758778817cf",
    "5fc993a7-a1ce-4403-a0a0-2afc9f9eca42",
    "214a48bc-4a1c-44e3-9415-a73af3d4fd95",
  ]),
  // Only printed token is double-faced.
  ("Ophiomancer", &["13e4832d-8530-4b85-b738-51d0c18f28ec"]),
  // Linked part is the token of the first ability, not the copy.
  ("Saheeli, the Gifted", &[
    "761507d5-d36a-4123-a074-95d7f6ffb4c5",
    GENERIC_COPY_TOKEN,
  ]),
  ("Daretti, Ingenious Iconoclast", &[
    "7c82af53-2de8-4cd6-84bf-fb39d2693de2",
    GENERIC_COPY_TOKEN,
  ]),
  // Closest printed 3/1 red elemental with haste.
  ("Chandra, Flamecaller", &["bc6f27f7-0248-4c04-8022-41073966e4d8"]),
  // Transform cards whose token ability lives on the back face.
  ("Arlinn Kord", &["bd05e304-1a16-436d-a05c-4a38a839759b"]),
  ("Bloodline Keeper", &["71496671-f7ba-4014-a895-d70a27979db7"]),
  ("Docent of Perfection", &["e4439a8b-ef98-428d-a274-53c660b23afe"]),
  ("Dowsing Dagger", &["642d1d93-22d0-43f9-8691-6790876185a0"]),
  ("Extricator of Sin", &["11d25bde-a303-4b06-a3e1-4ad642deae58"]),
  ("Garruk Relentless", &[
    "bd05e304-1a16-436d-a05c-4a38a839759b",
    "7a49607c-427a-474c-ad77-60cd05844b3c",
  ]),
  ("Golden Guardian", &["a7820eb9-6d7f-4bc4-b421-4e4420642fb7"]),
  ("Hanweir Militia Captain", &["94ed2eca-1579-411d-af6f-c7359c65de30"]),
  ("Huntmaster of the Fells", &["bd05e304-1a16-436d-a05c-4a38a839759b"]),
  ("Jace, Vryn's Prodigy", &["458e37b1-a849-41ae-b63c-3e09ffd814e4"]),
  ("Legion's Landing", &["09293ae7-0629-417b-9eda-9bd3f6d8e118"]),
  ("Liliana, Heretical Healer", &["8e214f84-01ee-49c1-8801-4e550b5ade5d"]),
  ("Mayor of Avabruck", &["bd05e304-1a16-436d-a05c-4a38a839759b"]),
  ("Nissa, Vastwood Seer", &["0affd414-f774-48d1-af9e-bff74e58e1ca"]),
  ("Shrill Howler", &["11d25bde-a303-4b06-a3e1-4ad642deae58"]),
  ("Storm the Vault", &[TREASURE]),
  ("Treasure Map", &[TREASURE]),
  ("Westvale Abbey", &["94ed2eca-1579-411d-af6f-c7359c65de30"]),
];

/// The curated list for `name`, or an empty slice.
pub fn overrides(name: &str) -> &'static [&'static str] {
  OVERRIDES
    .iter()
    .find(|(n, _)| *n == name)
    .map(|(_, ids)| *ids)
    .unwrap_or_default()
}
