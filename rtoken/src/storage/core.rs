use soroban_sdk::{contracttype, Address, Env, String};

#[contracttype]
pub enum CoreDataKeys {
    Deployed,
    Ruler,
    TokenSymbol,
    TokenDecimals,
    Supply,
}

pub struct Core {
    pub env: Env,
}

impl Core {
    #[inline(always)]
    pub fn new(e: &Env) -> Core {
        Core { env: e.clone() }
    }

    pub fn deployed(&self) -> bool {
        self.env
            .storage()
            .instance()
            .get(&CoreDataKeys::Deployed)
            .unwrap_or(false)
    }

    pub fn set_deployed(&self) {
        self.env
            .storage()
            .instance()
            .set(&CoreDataKeys::Deployed, &true);
    }

    pub fn ruler(&self) -> Option<Address> {
        self.env.storage().instance().get(&CoreDataKeys::Ruler)
    }

    pub fn set_ruler(&self, address: &Address) {
        self.env
            .storage()
            .instance()
            .set(&CoreDataKeys::Ruler, address);
    }

    pub fn symbol(&self) -> Option<String> {
        self.env
            .storage()
            .instance()
            .get(&CoreDataKeys::TokenSymbol)
    }

    pub fn set_symbol(&self, symbol: &String) {
        self.env
            .storage()
            .instance()
            .set(&CoreDataKeys::TokenSymbol, symbol);
    }

    pub fn decimals(&self) -> Option<u32> {
        self.env
            .storage()
            .instance()
            .get(&CoreDataKeys::TokenDecimals)
    }

    pub fn set_decimals(&self, decimals: &u32) {
        self.env
            .storage()
            .instance()
            .set(&CoreDataKeys::TokenDecimals, decimals);
    }

    pub fn supply(&self) -> i128 {
        self.env
            .storage()
            .instance()
            .get(&CoreDataKeys::Supply)
            .unwrap_or(0)
    }

    pub fn set_supply(&self, supply: &i128) {
        self.env
            .storage()
            .instance()
            .set(&CoreDataKeys::Supply, supply);
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
