use soroban_sdk::{contracttype, Address, Env};

#[contracttype]
pub enum BalancesDataKeys {
    Balance(Address),
}

pub struct Balances {
    pub env: Env,
}

impl Balances {
    #[inline(always)]
    pub fn new(e: &Env) -> Balances {
        Balances { env: e.clone() }
    }

    pub fn get(&self, account: &Address) -> i128 {
        self.env
            .storage()
            .persistent()
            .get(&BalancesDataKeys::Balance(account.clone()))
            .unwrap_or(0)
    }

    // Zero balances are deleted instead of stored, so the balance map only
    // holds funded accounts.
    pub fn set(&self, account: &Address, amount: i128) {
        let key = BalancesDataKeys::Balance(account.clone());
        if amount == 0 {
            self.env.storage().persistent().remove(&key);
        } else {
            self.env.storage().persistent().set(&key, &amount);
        }
    }

    pub fn bump(&self, account: &Address) {
        let key = BalancesDataKeys::Balance(account.clone());
        if self.env.storage().persistent().has(&key) {
            self.env
                .storage()
                .persistent()
                .extend_ttl(&key, 17280, 17280 * 30);
        }
    }
}

pub trait BalancesStorageFunc {
    fn _balances(&self) -> Balances;
}

impl BalancesStorageFunc for Env {
    #[inline(always)]
    fn _balances(&self) -> Balances {
        Balances::new(self)
    }
}
