//! Educational features: explanations of what each command does.

use colored::Colorize;

/// Command explanation builder.
pub struct Explain {
    title: String,
    description: String,
    request: Option<String>,
    requests: Option<String>,
    what_happens: Vec<String>,
    caveat: Option<String>,
}

impl Explain {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            request: None,
            requests: None,
            what_happens: Vec::new(),
            caveat: None,
        }
    }

    fn description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    fn request(mut self, request: &str) -> Self {
        self.request = Some(request.to_string());
        self
    }

    fn requests(mut self, count: &str) -> Self {
        self.requests = Some(count.to_string());
        self
    }

    fn step(mut self, step: &str) -> Self {
        self.what_happens.push(step.to_string());
        self
    }

    fn caveat(mut self, caveat: &str) -> Self {
        self.caveat = Some(caveat.to_string());
        self
    }

    /// Render the explanation as plain text lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone(), self.description.clone()];
        lines.extend(
            self.what_happens
                .iter()
                .enumerate()
                .map(|(i, step)| format!("{}. {}", i + 1, step)),
        );
        lines.extend(self.request.iter().cloned());
        lines.extend(self.requests.iter().cloned());
        lines.extend(self.caveat.iter().cloned());
        lines
    }

    /// Print the explanation to stdout.
    pub fn print(&self) {
        println!();
        println!("{}", format!("=== {} ===", self.title).bold().cyan());
        println!("{}", self.description);
        println!();

        if !self.what_happens.is_empty() {
            println!("{}", "How it works:".bold());
            for (i, step) in self.what_happens.iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
            println!();
        }

        if let Some(request) = &self.request {
            println!("{} {}", "Request:".bold(), request.dimmed());
        }

        if let Some(count) = &self.requests {
            println!("{} {}", "Outbound requests:".bold(), count);
        }

        if let Some(caveat) = &self.caveat {
            println!();
            println!("{} {}", "Note:".bold().yellow(), caveat);
        }

        println!();
        println!("{}", "=== Results ===".bold().cyan());
        println!();
    }

    // ========================================================================
    // Factory methods for each command
    // ========================================================================

    pub fn resolve(domain: &str, record_type: &str, chain: bool) -> Self {
        let explanation = Self::new("Resolve")
            .description(&format!(
                "Looks up the {record_type} records of {domain} through a DNS-over-HTTPS resolver."
            ))
            .request(&format!("GET <resolver>?name={domain}&type={record_type}"))
            .step("Sends one HTTPS request to the resolver's JSON API")
            .step("Lists the Answer section in the order the resolver returned it")
            .step("No Answer section means the name has no records of this type");

        if chain {
            explanation
                .step("If the FIRST record is a CNAME, resolves its target for A records")
                .step("Follows at most one alias hop")
                .requests("1, or 2 when a CNAME is followed")
        } else {
            explanation.requests("1")
        }
    }

    pub fn cert(domain: &str) -> Self {
        Self::new("Certificate Check")
            .description(&format!("Checks when the certificate served by {domain} expires."))
            .request(&format!("GET <proxy>?url=https://{domain}"))
            .requests("1")
            .step("Asks a fetch proxy to load the site over HTTPS")
            .step("Reads the x-certificate-valid-until response header")
            .step("Days left are rounded up; negative means already expired")
            .caveat("This relies on a third-party proxy, not a TLS handshake of our own.")
    }

    pub fn estimate(domain: &str, record_type: &str) -> Self {
        Self::new("Staleness Estimate")
            .description(&format!(
                "Estimates when the {record_type} record of {domain} last changed."
            ))
            .requests("1 or 2 (the resolution), the estimate itself is offline")
            .step("Resolves the record")
            .step("Takes the TTL of the first record")
            .step("Assumes the record was issued one full TTL ago")
            .caveat("The TTL only says how long caches may keep the record, so this is a guess.")
    }

    pub fn inspect(domain: &str) -> Self {
        Self::new("Inspect")
            .description(&format!("Runs every check against {domain} at once."))
            .requests("2 or 3, in parallel")
            .step("Starts the resolution and the certificate check concurrently")
            .step("Prints each result as it arrives")
            .step("Estimates staleness from the resolved answer")
    }

    pub fn types() -> Self {
        Self::new("Record Types")
            .description("Lists the record types with a fixed meaning.")
            .requests("none")
            .step("Any other mnemonic is sent to the resolver unchanged")
    }
}
