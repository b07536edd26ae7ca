use shared::{Error, Result, WalletRef};

/// Header names accepted for the wallet label column
pub const NAME_COLUMNS: [&str; 6] = ["Name", "Wallet_Name", "wallet_name", "name", "Label", "label"];

/// Header names accepted for the address column
pub const ADDRESS_COLUMNS: [&str; 6] = [
    "Address",
    "Wallet_Address",
    "wallet_address",
    "address",
    "STX_Address",
    "stx_address",
];

/// Positions of the name and address columns within a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: Option<usize>,
    pub address: usize,
}

impl ColumnMap {
    /// Locate the columns in a header row. When several headers match, the
    /// rightmost one wins.
    pub fn discover<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let find = |candidates: &[&str]| {
            headers
                .iter()
                .rposition(|h| candidates.iter().any(|c| *c == h.as_ref().trim()))
        };

        let address = find(&ADDRESS_COLUMNS[..]).ok_or(Error::MissingAddressColumn)?;
        let name = find(&NAME_COLUMNS[..]);

        Ok(Self { name, address })
    }
}

/// Accumulates wallets from data rows, applying the address filter and
/// generating `Wallet_<n>` names where the sheet has none
#[derive(Debug)]
pub struct WalletCollector {
    columns: ColumnMap,
    wallets: Vec<WalletRef>,
    skipped: usize,
}

impl WalletCollector {
    pub fn new(columns: ColumnMap) -> Self {
        Self {
            columns,
            wallets: Vec::new(),
            skipped: 0,
        }
    }

    pub fn push_row<S: AsRef<str>>(&mut self, row: &[S]) {
        let cell = |index: usize| row.get(index).map(|c| c.as_ref().trim()).unwrap_or("");

        let address = cell(self.columns.address);
        if !WalletRef::is_plausible_address(address) {
            self.skipped += 1;
            return;
        }

        let name = self
            .columns
            .name
            .map(cell)
            .filter(|n| !n.is_empty() && !n.eq_ignore_ascii_case("nan"))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Wallet_{}", self.wallets.len() + 1));

        self.wallets.push(WalletRef::new(name, address));
    }

    /// Rows rejected by the address filter so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn finish(self) -> Vec<WalletRef> {
        self.wallets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_discover_standard_headers() {
        let columns = ColumnMap::discover(&["Name", "Address"]).unwrap();
        assert_eq!(columns, ColumnMap { name: Some(0), address: 1 });
    }

    #[test]
    fn test_discover_variants() {
        let columns = ColumnMap::discover(&["notes", "STX_Address", " label "]).unwrap();
        assert_eq!(columns, ColumnMap { name: Some(2), address: 1 });

        let columns = ColumnMap::discover(&["wallet_address"]).unwrap();
        assert_eq!(columns, ColumnMap { name: None, address: 0 });
    }

    #[test]
    fn test_discover_last_match_wins() {
        let columns = ColumnMap::discover(&["address", "Address", "Name", "label"]).unwrap();
        assert_eq!(columns, ColumnMap { name: Some(3), address: 1 });

        let columns = ColumnMap::discover(&["Address", "STX_Address"]).unwrap();
        assert_eq!(columns, ColumnMap { name: None, address: 1 });
    }

    #[test]
    fn test_missing_address_column() {
        let err = ColumnMap::discover(&["Name", "Principal"]).unwrap_err();
        assert!(matches!(err, Error::MissingAddressColumn));
    }

    #[test]
    fn test_collector_filters_and_names() {
        let mut collector = WalletCollector::new(ColumnMap { name: Some(0), address: 1 });

        collector.push_row(&["Treasury", " SP1J8ff7N441J2p29F12C0ZA4GDE85X4QY8DRS1X6 "]);
        collector.push_row(&["", "SP3VCZ5ASNS5V22QHH2E41R82T960K22G0SK2GTG3"]);
        collector.push_row(&["Short", "SP123"]);
        collector.push_row(&["Blank", "nan"]);
        collector.push_row(&["Truncated"]);
        collector.push_row(&["nan", "SP24G0K7X701P65A7600J8TA053K01DbA2S2D1D6J"]);

        assert_eq!(collector.skipped(), 3);
        assert_eq!(
            collector.finish(),
            vec![
                WalletRef::new("Treasury", "SP1J8ff7N441J2p29F12C0ZA4GDE85X4QY8DRS1X6"),
                WalletRef::new("Wallet_2", "SP3VCZ5ASNS5V22QHH2E41R82T960K22G0SK2GTG3"),
                WalletRef::new("Wallet_3", "SP24G0K7X701P65A7600J8TA053K01DbA2S2D1D6J"),
            ]
        );
    }

    #[test]
    fn test_collector_without_name_column() {
        let mut collector = WalletCollector::new(ColumnMap { name: None, address: 0 });
        collector.push_row(&["SP1J8ff7N441J2p29F12C0ZA4GDE85X4QY8DRS1X6"]);

        assert_eq!(collector.finish()[0].name, "Wallet_1");
    }

    proptest! {
        #[test]
        fn prop_collected_addresses_pass_filter(addresses in proptest::collection::vec(".{0,24}", 0..30)) {
            let mut collector = WalletCollector::new(ColumnMap { name: None, address: 0 });
            for address in &addresses {
                collector.push_row(&[address.as_str()]);
            }
            let skipped = collector.skipped();
            let wallets = collector.finish();

            prop_assert_eq!(wallets.len() + skipped, addresses.len());
            for (i, wallet) in wallets.iter().enumerate() {
                prop_assert!(WalletRef::is_plausible_address(&wallet.address));
                prop_assert_eq!(&wallet.name, &format!("Wallet_{}", i + 1));
            }
        }
    }
}
