//! Built-in matchups for the default element ordering.

use crate::mechanics::{Tier, IMMUNE, NOT_VERY_EFFECTIVE, SUPER_EFFECTIVE};

const O: Tier = IMMUNE;
const H: Tier = NOT_VERY_EFFECTIVE;
const S: Tier = SUPER_EFFECTIVE;

/// Every pair not listed here is normal, including anything involving `none`.
pub(super) const DEFAULT_MATCHUPS: &[(&str, &[(&str, Tier)])] = &[
    ("normal", &[("rock", H), ("ghost", O), ("steel", H)]),
    (
        "fire",
        &[
            ("fire", H),
            ("water", H),
            ("grass", S),
            ("ice", S),
            ("bug", S),
            ("rock", H),
            ("dragon", H),
            ("steel", S),
        ],
    ),
    (
        "water",
        &[
            ("fire", S),
            ("water", H),
            ("grass", H),
            ("ground", S),
            ("rock", S),
            ("dragon", H),
        ],
    ),
    (
        "electric",
        &[
            ("water", S),
            ("electric", H),
            ("grass", H),
            ("ground", O),
            ("flying", S),
            ("dragon", H),
        ],
    ),
    (
        "grass",
        &[
            ("fire", H),
            ("water", S),
            ("grass", H),
            ("poison", H),
            ("ground", S),
            ("flying", H),
            ("bug", H),
            ("rock", S),
            ("dragon", H),
            ("steel", H),
        ],
    ),
    (
        "ice",
        &[
            ("fire", H),
            ("water", H),
            ("grass", S),
            ("ice", H),
            ("ground", S),
            ("flying", S),
            ("dragon", S),
            ("steel", H),
        ],
    ),
    (
        "fighting",
        &[
            ("normal", S),
            ("ice", S),
            ("poison", H),
            ("flying", H),
            ("psychic", H),
            ("bug", H),
            ("rock", S),
            ("ghost", O),
            ("dark", S),
            ("steel", S),
            ("fairy", H),
        ],
    ),
    (
        "poison",
        &[
            ("grass", S),
            ("poison", H),
            ("ground", H),
            ("rock", H),
            ("ghost", H),
            ("steel", O),
            ("fairy", S),
        ],
    ),
    (
        "ground",
        &[
            ("fire", S),
            ("electric", S),
            ("grass", H),
            ("poison", S),
            ("flying", O),
            ("bug", H),
            ("rock", S),
            ("steel", S),
        ],
    ),
    (
        "flying",
        &[
            ("electric", H),
            ("grass", S),
            ("fighting", S),
            ("bug", S),
            ("rock", H),
            ("steel", H),
        ],
    ),
    (
        "psychic",
        &[
            ("fighting", S),
            ("poison", S),
            ("psychic", H),
            ("dark", O),
            ("steel", H),
        ],
    ),
    (
        "bug",
        &[
            ("fire", H),
            ("grass", S),
            ("fighting", H),
            ("poison", H),
            ("flying", H),
            ("psychic", S),
            ("ghost", H),
            ("dark", S),
            ("steel", H),
            ("fairy", H),
        ],
    ),
    (
        "rock",
        &[
            ("fire", S),
            ("ice", S),
            ("fighting", H),
            ("ground", H),
            ("flying", S),
            ("bug", S),
            ("steel", H),
        ],
    ),
    (
        "ghost",
        &[("normal", O), ("psychic", S), ("ghost", S), ("dark", H)],
    ),
    ("dragon", &[("dragon", S), ("steel", H), ("fairy", O)]),
    (
        "dark",
        &[
            ("fighting", H),
            ("psychic", S),
            ("ghost", S),
            ("dark", H),
            ("fairy", H),
        ],
    ),
    (
        "steel",
        &[
            ("fire", H),
            ("water", H),
            ("electric", H),
            ("ice", S),
            ("rock", S),
            ("steel", H),
            ("fairy", S),
        ],
    ),
    (
        "fairy",
        &[
            ("fire", H),
            ("fighting", S),
            ("poison", H),
            ("dragon", S),
            ("dark", S),
            ("steel", H),
        ],
    ),
];
