use soroban_sdk::{contracttype, Address, Env, Vec};

#[contracttype]
#[derive(Clone, Debug)]
pub struct CoreState {
    pub admin: Address,
    pub fee_receiver: Address,
    // Fixed-point fraction, base 1e8
    pub flash_loan_rate: u128,
    // Dense, starts at 1
    pub next_pair_index: u32,
    // Every token ever used as collateral, no duplicates
    pub collaterals: Vec<Address>,
}

#[contracttype]
pub enum CoreDataKeys {
    CoreState,
}

pub struct Core {
    pub env: Env,
}

impl Core {
    #[inline(always)]
    pub fn new(e: &Env) -> Core {
        Core { env: e.clone() }
    }

    pub fn state(&self) -> Option<CoreState> {
        self.env.storage().instance().get(&CoreDataKeys::CoreState)
    }

    pub fn set_state(&self, state: &CoreState) {
        self.env
            .storage()
            .instance()
            .set(&CoreDataKeys::CoreState, state);
    }

    pub fn bump(&self) {
        self.env.storage().instance().extend_ttl(17280, 17280 * 30);
    }
}

pub trait CoreStorageFunc {
    fn _core(&self) -> Core;
}

impl CoreStorageFunc for Env {
    #[inline(always)]
    fn _core(&self) -> Core {
        Core::new(self)
    }
}
