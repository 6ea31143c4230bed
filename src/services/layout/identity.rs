//! Caregiver visual identity: display name, initials and a stable colour.

use std::collections::HashMap;

use crate::models::layout::Rgb;
use crate::models::shift::CareTeamMember;

pub const UNASSIGNED_NAME: &str = "Unassigned";
pub const UNKNOWN_NAME: &str = "Unknown Professional";
pub const UNKNOWN_INITIALS: &str = "?";
const MAX_INITIALS: usize = 3;

/// Caregiver palette, version 1.
///
/// Committed constant: a caregiver's colour is `PALETTE_V1[sum % len]` where
/// `sum` is the sum of the identifier's UTF-16 code units, taken from the id
/// exactly as supplied (padding included). Reordering or
/// resizing this table changes every caregiver's colour in printed documents.
pub const PALETTE_V1: [Rgb; 10] = [
    Rgb::new(59, 130, 246),  // blue
    Rgb::new(16, 185, 129),  // emerald
    Rgb::new(245, 158, 11),  // amber
    Rgb::new(239, 68, 68),   // red
    Rgb::new(139, 92, 246),  // violet
    Rgb::new(236, 72, 153),  // pink
    Rgb::new(20, 184, 166),  // teal
    Rgb::new(249, 115, 22),  // orange
    Rgb::new(99, 102, 241),  // indigo
    Rgb::new(132, 204, 22),  // lime
];

/// Colour of shifts without a caregiver; never produced by the hash
pub const UNASSIGNED_GRAY: Rgb = Rgb::new(156, 163, 175);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaregiverIdentity {
    pub name: String,
    pub initials: String,
    pub color: Rgb,
}

pub fn palette_index(caregiver_id: &str) -> usize {
    let sum: u64 = caregiver_id.encode_utf16().map(u64::from).sum();
    (sum % PALETTE_V1.len() as u64) as usize
}

pub fn caregiver_color(caregiver_id: Option<&str>) -> Rgb {
    match caregiver_id {
        Some(id) if normalize(Some(id)).is_some() => PALETTE_V1[palette_index(id)],
        _ => UNASSIGNED_GRAY,
    }
}

/// First letter of each word, uppercased, at most three letters
pub fn initials_for(name: &str) -> String {
    if name == UNASSIGNED_NAME || name == UNKNOWN_NAME {
        return UNKNOWN_INITIALS.to_string();
    }
    let initials: String = name
        .split_whitespace()
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .take(MAX_INITIALS)
        .collect();
    if initials.is_empty() {
        UNKNOWN_INITIALS.to_string()
    } else {
        initials
    }
}

fn normalize(caregiver_id: Option<&str>) -> Option<&str> {
    caregiver_id.map(str::trim).filter(|id| !id.is_empty())
}

/// Registry lookup built once per render pass
pub struct IdentityResolver<'a> {
    names: HashMap<&'a str, &'a str>,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(members: &'a [CareTeamMember]) -> Self {
        let mut names = HashMap::with_capacity(members.len());
        for member in members {
            // First registration of an identifier wins
            names
                .entry(member.caregiver_id.trim())
                .or_insert(member.name.as_str());
        }
        Self { names }
    }

    pub fn display_name(&self, caregiver_id: Option<&str>) -> String {
        let Some(id) = normalize(caregiver_id) else {
            return UNASSIGNED_NAME.to_string();
        };
        match self.names.get(id).map(|name| name.trim()) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => UNKNOWN_NAME.to_string(),
        }
    }

    pub fn resolve(&self, caregiver_id: Option<&str>) -> CaregiverIdentity {
        let name = self.display_name(caregiver_id);
        CaregiverIdentity {
            initials: initials_for(&name),
            color: caregiver_color(caregiver_id),
            name,
        }
    }
}
