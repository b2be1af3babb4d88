//! RngSeed: доменный seed для RNG движка.
//!
//! Позволяет:
//!   - хранить базовый seed ([u8;32] или u64 для тестов)
//!   - делать детерминированное hash-reseeding для каждого матча:
//!         new = H(domain || old || match_index)
//!   - создавать DeterministicRng из seed

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::infra::rng::DeterministicRng;

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Создать seed из u64 (для удобства тестов и dev-CLI).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Seed для конкретного матча внутри сессии.
    pub fn derive(&self, match_index: u64) -> Self {
        let mut hasher = Sha256::new();

        // Доменный префикс
        hasher.update(b"DAVINCI_ENGINE_RNG_V1");
        hasher.update(self.bytes);
        hasher.update(match_index.to_le_bytes());

        let hash = hasher.finalize();

        let mut out = [0u8; 32];
        out.copy_from_slice(&hash[..32]);

        Self { bytes: out }
    }

    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed(self.bytes)
    }
}
