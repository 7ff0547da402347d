//! Local denylist pre-filter.
//!
//! Advisory hardening only: catches the obvious requests for real
//! intoxicants, biological fluids, and hazardous chemicals before any
//! external call is spent. The moderation gate and the generation policy
//! remain the real safety mechanisms.

/// Case-insensitive substring denylist. Matching is deliberately blunt:
/// a false positive costs the player a refusal-flavored drink, nothing more.
const DENYLIST: &[&str] = &[
    // intoxicants
    "alcohol",
    "beer",
    "wine",
    "vodka",
    "whiskey",
    "whisky",
    "tequila",
    "rum",
    "absinthe",
    "meth",
    "cocaine",
    "heroin",
    "fentanyl",
    // biological fluids
    "blood",
    "urine",
    "piss",
    "pee",
    "semen",
    "vomit",
    "saliva",
    "bile",
    // hazardous chemicals
    "bleach",
    "cyanide",
    "arsenic",
    "mercury",
    "antifreeze",
    "gasoline",
    "petrol",
    "ammonia",
    "drain cleaner",
    "battery acid",
];

/// Returns `true` when the query contains a denylisted token.
/// Pure and synchronous; no failure mode.
pub fn is_denied(query: &str) -> bool {
    let lowered = query.to_lowercase();
    DENYLIST.iter().any(|token| lowered.contains(token))
}
