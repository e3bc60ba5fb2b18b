//! `parajudica frameworks` - list the available bundles.

use crate::error::CliResult;

pub fn run() -> CliResult<()> {
    println!("base (always loaded)");
    for name in parajudica_reasoner::frameworks::available() {
        let framework = parajudica_reasoner::frameworks::by_name(name)
            .expect("listed bundle resolves");
        let policy = match &framework.k_policy {
            Some(policy) if policy.singling_out => {
                format!(", k >= {} + singling-out check", policy.min_k)
            }
            Some(policy) => format!(", k >= {}", policy.min_k),
            None => String::new(),
        };
        println!("{name} ({} rules{policy})", framework.rules.len());
    }
    Ok(())
}
