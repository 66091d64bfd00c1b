use soroban_sdk::{contracttype, Address, Env, Vec};

// Fees are pooled per token across all pairs. The Tokens list exists because
// persistent keys cannot be iterated; it records every token that ever
// accrued a fee so collect_fees can sweep them.
#[contracttype]
pub enum FeesDataKeys {
    Fee(Address),
    Tokens,
}

pub struct Fees {
    pub env: Env,
}

impl Fees {
    #[inline(always)]
    pub fn new(e: &Env) -> Fees {
        Fees { env: e.clone() }
    }

    pub fn fee(&self, token: &Address) -> u128 {
        self.env
            .storage()
            .persistent()
            .get(&FeesDataKeys::Fee(token.clone()))
            .unwrap_or(0)
    }

    pub fn accrue(&self, token: &Address, amount: u128) {
        if amount == 0 {
            return;
        }

        let key = FeesDataKeys::Fee(token.clone());
        let accrued: u128 = self.fee(token) + amount;
        self.env.storage().persistent().set(&key, &accrued);
        self.env
            .storage()
            .persistent()
            .extend_ttl(&key, 17280, 17280 * 30);

        let mut tokens = self.tokens();
        if !tokens.contains(token) {
            tokens.push_back(token.clone());
            self.env
                .storage()
                .instance()
                .set(&FeesDataKeys::Tokens, &tokens);
        }
    }

    pub fn clear(&self, token: &Address) {
        self.env
            .storage()
            .persistent()
            .remove(&FeesDataKeys::Fee(token.clone()));
    }

    pub fn tokens(&self) -> Vec<Address> {
        self.env
            .storage()
            .instance()
            .get(&FeesDataKeys::Tokens)
            .unwrap_or(Vec::new(&self.env))
    }
}

pub trait FeesStorageFunc {
    fn _fees(&self) -> Fees;
}

impl FeesStorageFunc for Env {
    #[inline(always)]
    fn _fees(&self) -> Fees {
        Fees::new(self)
    }
}
