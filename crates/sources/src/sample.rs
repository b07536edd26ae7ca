use shared::WalletRef;

/// Addresses used for a quick smoke run when no input file is at hand
pub const SAMPLE_ADDRESSES: [(&str, &str); 3] = [
    ("Wallet 1", "SP1J8ff7N441J2p29F12C0ZA4GDE85X4QY8DRS1X6"),
    ("Wallet 2", "SP3VCZ5ASNS5V22QHH2E41R82T960K22G0SK2GTG3"),
    ("Wallet 3", "SP24G0K7X701P65A7600J8TA053K01DbA2S2D1D6J"),
];

pub fn sample_wallets() -> Vec<WalletRef> {
    SAMPLE_ADDRESSES
        .iter()
        .map(|(name, address)| WalletRef::new(*name, *address))
        .collect()
}
