// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Voices available for narrating a roast

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A narrator voice, mapped to an opaque Fish Audio reference id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VoiceSelection {
    #[default]
    BarackObama,
    Spongebob,
    Patrick,
    Joker,
    TheRock,
    Elmo,
    Squidward,
}

/// Catalog entry returned by `GET /api/voices`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceInfo {
    pub id: VoiceSelection,
    pub name: String,
    pub description: String,
    pub reference_id: String,
}

impl VoiceSelection {
    pub const ALL: [VoiceSelection; 7] = [
        VoiceSelection::BarackObama,
        VoiceSelection::Spongebob,
        VoiceSelection::Patrick,
        VoiceSelection::Joker,
        VoiceSelection::TheRock,
        VoiceSelection::Elmo,
        VoiceSelection::Squidward,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            VoiceSelection::BarackObama => "barack-obama",
            VoiceSelection::Spongebob => "spongebob",
            VoiceSelection::Patrick => "patrick",
            VoiceSelection::Joker => "joker",
            VoiceSelection::TheRock => "the-rock",
            VoiceSelection::Elmo => "elmo",
            VoiceSelection::Squidward => "squidward",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VoiceSelection::BarackObama => "Barack Obama",
            VoiceSelection::Spongebob => "SpongeBob",
            VoiceSelection::Patrick => "Patrick",
            VoiceSelection::Joker => "Joker",
            VoiceSelection::TheRock => "The Rock",
            VoiceSelection::Elmo => "Elmo",
            VoiceSelection::Squidward => "Squidward",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            VoiceSelection::BarackObama => "Presidential roast",
            VoiceSelection::Spongebob => "I'm ready!",
            VoiceSelection::Patrick => "Is mayonnaise an instrument?",
            VoiceSelection::Joker => "Why so serious?",
            VoiceSelection::TheRock => "Can you smell what's cooking?",
            VoiceSelection::Elmo => "Elmo loves costumes!",
            VoiceSelection::Squidward => "Bold and brash",
        }
    }

    /// Fish Audio voice model reference
    pub fn reference_id(&self) -> &'static str {
        match self {
            VoiceSelection::BarackObama => "4ce7e917cedd4bc2bb2e6ff3a46acaa1",
            VoiceSelection::Spongebob => "54e3a85ac9594ffa83264b8a494b901b",
            VoiceSelection::Patrick => "d75c270eaee14c8aa1e9e980cc37cf1b",
            VoiceSelection::Joker => "fad5a5a6770e47019f566b8f8c0ff609",
            VoiceSelection::TheRock => "7cc3a7aca00a489eac430d35fd6203e3",
            VoiceSelection::Elmo => "193f7f8f649b418382885c5fb4fb7109",
            VoiceSelection::Squidward => "dcc29b2dcbc04278bc5a137debea52ec",
        }
    }

    pub fn info(&self) -> VoiceInfo {
        VoiceInfo {
            id: *self,
            name: self.display_name().to_string(),
            description: self.description().to_string(),
            reference_id: self.reference_id().to_string(),
        }
    }

    pub fn catalog() -> Vec<VoiceInfo> {
        Self::ALL.iter().map(|v| v.info()).collect()
    }
}

impl fmt::Display for VoiceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for VoiceSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.id() == s)
            .ok_or_else(|| {
                let ids: Vec<&str> = Self::ALL.iter().map(|v| v.id()).collect();
                format!("unknown voice '{}', available: {}", s, ids.join(", "))
            })
    }
}
