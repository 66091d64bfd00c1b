use soroban_sdk::{contracttype, Address, Env};

/// Identity of a lending pair; at most one pair exists per value.
#[contracttype]
#[derive(Clone)]
pub struct PairId {
    pub collateral: Address,
    pub paired: Address,
    pub expiry: u64,
    pub mint_ratio: u128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct Pair {
    pub index: u32,
    pub active: bool,
    pub collateral_token: Address,
    pub paired_token: Address,
    pub rc_token: Address,
    pub rr_token: Address,
    pub expiry: u64,
    pub mint_ratio: u128,
    pub fee_rate: u128,
    // Collateral still at risk of default; only redeem decreases it
    pub col_total: u128,
}

#[contracttype]
pub enum PairsDataKeys {
    Pair(u32),
    Index(PairId),
}

pub struct Pairs {
    pub env: Env,
}

impl Pairs {
    #[inline(always)]
    pub fn new(e: &Env) -> Pairs {
        Pairs { env: e.clone() }
    }

    pub fn index(&self, id: &PairId) -> Option<u32> {
        self.env
            .storage()
            .persistent()
            .get(&PairsDataKeys::Index(id.clone()))
    }

    pub fn set_index(&self, id: &PairId, index: u32) {
        self.env
            .storage()
            .persistent()
            .set(&PairsDataKeys::Index(id.clone()), &index);
    }

    pub fn pair(&self, index: u32) -> Option<Pair> {
        self.env
            .storage()
            .persistent()
            .get(&PairsDataKeys::Pair(index))
    }

    pub fn set_pair(&self, pair: &Pair) {
        self.env
            .storage()
            .persistent()
            .set(&PairsDataKeys::Pair(pair.index), pair);
    }

    pub fn bump_pair(&self, index: u32) {
        self.env
            .storage()
            .persistent()
            .extend_ttl(&PairsDataKeys::Pair(index), 17280, 17280 * 30);
    }

    pub fn bump_index(&self, id: &PairId) {
        self.env.storage().persistent().extend_ttl(
            &PairsDataKeys::Index(id.clone()),
            17280,
            17280 * 30,
        );
    }
}

pub trait PairsStorageFunc {
    fn _pairs(&self) -> Pairs;
}

impl PairsStorageFunc for Env {
    #[inline(always)]
    fn _pairs(&self) -> Pairs {
        Pairs::new(self)
    }
}
