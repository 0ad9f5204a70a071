//! Block explorer links for accounts

/// Explorer base URL for a network id
pub fn explorer_base(network: &str) -> Option<&'static str> {
    let base = match network {
        "1" => "https://etherscan.io",
        "3" => "https://ropsten.etherscan.io",
        "4" => "https://rinkeby.etherscan.io",
        "5" => "https://goerli.etherscan.io",
        "42" => "https://kovan.etherscan.io",
        "30" => "https://explorer.rsk.co",
        "31" => "https://explorer.testnet.rsk.co",
        "77" => "https://blockscout.com/poa/sokol",
        "99" => "https://blockscout.com/poa/core",
        "100" => "https://blockscout.com/poa/xdai",
        _ => return None,
    };
    Some(base)
}

/// Account page on the network's explorer, if the network has one
pub fn account_url(network: &str, address: &str) -> Option<String> {
    explorer_base(network).map(|base| format!("{}/address/{}", base, address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_networks() {
        assert_eq!(
            account_url("1", "0xabc").as_deref(),
            Some("https://etherscan.io/address/0xabc")
        );
        assert_eq!(
            account_url("99", "0xabc").as_deref(),
            Some("https://blockscout.com/poa/core/address/0xabc")
        );
    }

    #[test]
    fn test_unknown_network() {
        assert_eq!(account_url("1337", "0xabc"), None);
    }
}
