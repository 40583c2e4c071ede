// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;

use smol_str::SmolStr;

/// The key an exam session uses to remember which questions it already presented.
///
/// Identity is the question text itself: two bank entries with the same text share a
/// fingerprint and count as one "used" question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint {
    value: SmolStr,
}

impl Fingerprint {
    pub fn of_text(text: &str) -> Self {
        Self {
            value: SmolStr::new(text),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Fingerprint {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::Fingerprint;

    #[test]
    fn identical_text_shares_a_fingerprint() {
        let mut used = HashSet::new();
        used.insert(Fingerprint::of_text("2+2?"));
        assert!(used.contains("2+2?"));
        assert!(!used.insert(Fingerprint::of_text("2+2?")));
    }
}
