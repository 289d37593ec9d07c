use anyhow::Result;

pub fn line() -> String {
    format!("Godrive CLI Version: {}", env!("CARGO_PKG_VERSION"))
}

pub fn run() -> Result<()> {
    println!("{}", line());
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn prints_fixed_version() {
        assert_eq!(super::line(), "Godrive CLI Version: 1.0.0");
    }
}
