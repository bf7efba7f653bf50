//! Phoneme symbol to model id table.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::SymbolTableError;
use crate::language::tables;

/// Default padding symbol.
pub const PAD: &str = "_";
/// Default begin-of-sequence symbol.
pub const BOS: &str = "^";
/// Default end-of-sequence symbol.
pub const EOS: &str = "$";
/// Default word separator symbol.
pub const SEP: &str = " ";

/// The four reserved symbol strings of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedSymbols {
    pub pad: String,
    pub bos: String,
    pub eos: String,
    pub sep: String,
}

impl Default for ReservedSymbols {
    fn default() -> Self {
        Self {
            pad: PAD.to_string(),
            bos: BOS.to_string(),
            eos: EOS.to_string(),
            sep: SEP.to_string(),
        }
    }
}

/// Immutable mapping from phoneme symbols to non-negative ids.
///
/// PAD and SEP must be present. BOS and EOS are optional; without them the
/// tokenizer cannot add boundary markers.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    ids: HashMap<String, i64>,
    reserved: ReservedSymbols,
    pad_id: i64,
    sep_id: i64,
    bos_id: Option<i64>,
    eos_id: Option<i64>,
}

impl SymbolTable {
    pub fn new(
        ids: HashMap<String, i64>,
        reserved: ReservedSymbols,
    ) -> Result<Self, SymbolTableError> {
        if let Some((symbol, &id)) = ids.iter().find(|(_, id)| **id < 0) {
            return Err(SymbolTableError::NegativeId {
                symbol: symbol.clone(),
                id,
            });
        }

        let require = |role: &'static str, symbol: &str| {
            ids.get(symbol)
                .copied()
                .ok_or_else(|| SymbolTableError::MissingReserved {
                    role,
                    symbol: symbol.to_string(),
                })
        };
        let pad_id = require("pad", &reserved.pad)?;
        let sep_id = require("separator", &reserved.sep)?;

        let bos_id = ids.get(&reserved.bos).copied();
        let eos_id = ids.get(&reserved.eos).copied();
        if bos_id.is_none() || eos_id.is_none() {
            log::warn!("Symbol table lacks BOS/EOS symbols, boundary markers disabled");
        }

        Ok(Self {
            ids,
            reserved,
            pad_id,
            sep_id,
            bos_id,
            eos_id,
        })
    }

    /// Table covering everything the rule-based mapper and the passthrough
    /// tier can emit.
    ///
    /// Ids: `_`=0, `^`=1, `$`=2, ` `=3, then the remaining symbols in
    /// sorted order.
    pub fn builtin() -> Self {
        let reserved = ReservedSymbols::default();
        let mut symbols: BTreeSet<char> = tables::emitted_symbols();
        symbols.extend('a'..='z');
        symbols.extend('0'..='9');
        symbols.extend(".,!?;:'-".chars());

        let mut ids = HashMap::new();
        for (i, s) in [PAD, BOS, EOS, SEP].iter().enumerate() {
            ids.insert(s.to_string(), i as i64);
        }
        for c in symbols {
            let next = ids.len() as i64;
            ids.entry(c.to_string()).or_insert(next);
        }

        Self {
            ids,
            reserved,
            pad_id: 0,
            sep_id: 3,
            bos_id: Some(1),
            eos_id: Some(2),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<i64> {
        self.ids.get(symbol).copied()
    }

    pub fn contains_id(&self, id: i64) -> bool {
        self.ids.values().any(|&v| v == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn reserved(&self) -> &ReservedSymbols {
        &self.reserved
    }

    pub fn pad_id(&self) -> i64 {
        self.pad_id
    }

    pub fn sep_id(&self) -> i64 {
        self.sep_id
    }

    pub fn bos_id(&self) -> Option<i64> {
        self.bos_id
    }

    pub fn eos_id(&self) -> Option<i64> {
        self.eos_id
    }
}
