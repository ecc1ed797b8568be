//! # Cookie Style (OAS 3.2)
//!
//! Cookie-style values are `name=value` pairs separated by `; ` and are never
//! percent-encoded:
//!
//! | shape | explode | wire |
//! |---|---|---|
//! | primitive | any | `n=v` |
//! | array | true | `n=a; n=b` |
//! | array | false | `n=a,b` |
//! | object | true | `k=v; k=v` |
//! | object | false | `n=k,v,k,v` |

use super::dispatch::Leads;
use super::{ArrayLayout, ObjectLayout, PrimitiveLayout};

/// Separator between cookie pairs.
pub const PAIR_SEPARATOR: &str = "; ";

/// Primitive cookie layout and whether it embeds the parameter name.
pub fn primitive_layout(leads: &Leads) -> (PrimitiveLayout, bool) {
    (PrimitiveLayout::Prefixed { lead: leads.key() }, true)
}

/// Array cookie layout and whether it embeds the parameter name.
pub fn array_layout(explode: bool, leads: &Leads) -> (ArrayLayout, bool) {
    if explode {
        (ArrayLayout::repeated("", leads.key(), PAIR_SEPARATOR), true)
    } else {
        (ArrayLayout::joined(leads.key(), ","), true)
    }
}

/// Object cookie layout and whether it embeds the parameter name.
pub fn object_layout(explode: bool, leads: &Leads) -> (ObjectLayout, bool) {
    if explode {
        (
            ObjectLayout::Entries {
                lead: String::new(),
                separator: PAIR_SEPARATOR,
            },
            false,
        )
    } else {
        (
            ObjectLayout::Flat {
                lead: leads.key(),
                separator: ",",
            },
            true,
        )
    }
}
