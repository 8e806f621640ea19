use argkit::{Error, Parser, Result, validate};

pub const PROGRAM: &str = "argkit-demo";

/// Declare every argument the demo accepts.
pub fn build() -> Result<Parser> {
    let mut cli = Parser::new(PROGRAM);
    cli.header(format!("{PROGRAM} {}", env!("CARGO_PKG_VERSION")))
        .description("Parse a realistic set of arguments and print what was understood.")
        .footer("Set RUST_LOG=debug to trace registration and parsing.");

    cli.add_str("input", "Input file path", None)?;
    cli.add_str(["-o", "--output"], "Output file path", Some("result.txt"))?
        .value_name("FILE");

    cli.add_int(["-c", "--count"], "Number of items (1-100)", Some(10))?
        .in_range(1, 100);
    cli.add_float(["-r", "--ratio"], "Ratio value (0.0-1.0)", Some(0.5))?
        .validate(|name, value: &f64| {
            if !(0.0..=1.0).contains(value) {
                return Err(Error::invalid_value(name, "ratio must be between 0.0 and 1.0"));
            }
            Ok(())
        });

    cli.add_bool(["-v", "--verbose"], "Enable verbose output", None)?;
    cli.add_bool(["-q", "--quiet"], "Quiet mode", None)?;

    cli.add_str(["-e", "--email"], "Contact email", Some("user@example.com"))?
        .email();
    cli.add_str(["-u", "--url"], "API endpoint URL", Some("https://api.example.com"))?
        .url();
    cli.add_str(["-d", "--directory"], "Working directory", Some("."))?
        .value_name("DIR");
    cli.set_validator::<String, _>("directory", validate::is_directory::<String>())?;
    cli.add_str(["-pth", "--path"], "Path to file or directory", Some("."))?
        .path_exists();
    cli.add_strs(["--include"], "Extra files to read", Some(&[]))?
        .value_name("FILE")
        .is_file();
    cli.add_str(["-m", "--mode"], "Processing mode", Some("normal"))?
        .one_of(["normal", "fast", "safe", "debug"]);
    cli.add_str(["-t", "--token"], "Access token", Some("ABC123"))?
        .alphanumeric();
    cli.add_str(["--alpha"], "Alpha-only string", Some("abc"))?
        .alpha();
    cli.add_str(["--numeric"], "Numeric string", Some("123"))?
        .numeric();

    cli.add_ints(["-i", "--ids"], "List of IDs (1-999)", Some(vec![1, 2, 3]))?
        .in_range(1, 999);
    cli.add_floats(["-s", "--scores"], "Performance scores (0.0-1.0)", Some(vec![0.8, 0.9, 0.75]))?
        .in_range(0.0, 1.0);
    cli.add_strs(["-p", "--plugins"], "Plugin names", Some(&["auth", "logging"]))?
        .alpha();
    cli.add_bools(["-f", "--features"], "Feature flags", Some(vec![true, false, true]))?;

    cli.add_str(["--ip"], "Server IP address", Some("127.0.0.1"))?
        .ip_address();
    cli.add_str(["--ipv4"], "IPv4 address", Some("192.168.1.1"))?
        .ipv4();
    cli.add_str(["--ipv6"], "IPv6 address", Some("2001:0db8:85a3:0000:0000:8a2e:0370:7334"))?
        .ipv6();
    cli.add_str(["--mac"], "Device MAC address", Some("00:1A:2B:3C:4D:5E"))?
        .mac_address();
    cli.add_str(["--session"], "Session UUID", Some("123e4567-e89b-12d3-a456-426614174000"))?
        .uuid();

    cli.add_bool(["--schema"], "Print the argument schema as JSON and exit", None)?;
    Ok(cli)
}
