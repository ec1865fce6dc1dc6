use rand::seq::SliceRandom;
use rand::Rng;

use super::config::{Config, Listing};
use super::error::{Error, Result};
use super::location::Location;
use super::parser;
use super::runner::{ProcessRunner, Runner};

const CONNECT: &str = "connect";
const DISCONNECT: &str = "disconnect";

/// Drives the `expressvpn` command line client.
pub struct Client<R: Runner> {
    runner: R,
    config: Config,
}

impl Client<ProcessRunner> {
    pub fn from_config(config: Config) -> Self {
        let runner = ProcessRunner::new(config.program.clone());
        Client { runner, config }
    }
}

impl<R: Runner> Client<R> {
    pub fn new(runner: R, config: Config) -> Self {
        Client { runner, config }
    }

    pub fn list(&self, listing: Listing) -> Result<Vec<Location>> {
        let text = self.runner.run(listing.args())?;
        let locations = parser::parse_listing(&text, self.config.trim(listing))?;
        log::debug!("{:?} listing: {} locations", listing, locations.len());
        Ok(locations)
    }

    pub fn list_all(&self) -> Result<Vec<Location>> {
        self.list(Listing::All)
    }

    pub fn list_recommended(&self) -> Result<Vec<Location>> {
        self.list(Listing::Recommended)
    }

    pub fn find(&self, listing: Listing, alias: &str) -> Result<Option<Location>> {
        Ok(self
            .list(listing)?
            .into_iter()
            .find(|location| location.alias() == alias))
    }

    pub fn connect(&self, alias: &str) -> Result<()> {
        self.runner.run(&[CONNECT, alias])?;
        Ok(())
    }

    /// Connects only if `alias` shows up in the full listing.
    pub fn connect_verified(&self, alias: &str) -> Result<Location> {
        let location = self
            .find(Listing::All, alias)?
            .ok_or_else(|| Error::UnknownAlias(alias.to_string()))?;
        self.connect(location.alias())?;
        Ok(location)
    }

    /// Connects to a random recommended location.
    pub fn random_connect(&self) -> Result<Location> {
        self.random_connect_with(&mut rand::thread_rng())
    }

    pub fn random_connect_with<G: Rng + ?Sized>(&self, rng: &mut G) -> Result<Location> {
        let locations = self.list_recommended()?;
        let location = locations.choose(rng).ok_or(Error::NoLocations)?.clone();
        log::debug!("picked {}", location.alias());

        self.connect(location.alias())?;
        Ok(location)
    }

    pub fn disconnect(&self) -> Result<()> {
        self.runner.run(&[DISCONNECT])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    const LIST_ALL: &str = "\
ALIAS COUNTRY                     LOCATION                       RECOMMENDED
----- ---------------             ------------------------------ -----------
smart Smart Location              USA - New Jersey - 1           Y
usny  United States (US)          USA - New York                 Y
uklo  UK - London                 Y
frpa  France - Paris
";

    const LIST_RECOMMENDED: &str = "\
Recommended locations:
ALIAS COUNTRY                     LOCATION                       RECOMMENDED
----- ---------------             ------------------------------ -----------
smart Smart Location              USA - New Jersey - 1           Y
uklo  UK - London                 Y

Type 'expressvpn list all' to see all locations.
";

    #[derive(Default)]
    struct FakeRunner {
        outputs: HashMap<String, String>,
        failing: HashMap<String, String>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeRunner {
        fn with_listings() -> Self {
            let mut runner = FakeRunner::default();
            runner.outputs.insert("list all".into(), LIST_ALL.into());
            runner.outputs.insert("list".into(), LIST_RECOMMENDED.into());
            runner
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl Runner for FakeRunner {
        fn run(&self, args: &[&str]) -> Result<String> {
            let key = args.join(" ");
            self.calls.borrow_mut().push(key.clone());

            if let Some(output) = self.failing.get(&key) {
                return Err(Error::ExternalTool {
                    command: format!("expressvpn {}", key),
                    status: ExitStatus::from_raw(1 << 8),
                    output: output.clone(),
                });
            }
            Ok(self.outputs.get(&key).cloned().unwrap_or_default())
        }
    }

    fn client(runner: &FakeRunner) -> Client<&FakeRunner> {
        Client::new(runner, Config::default())
    }

    #[test]
    fn lists_all_locations() {
        let runner = FakeRunner::with_listings();
        let aliases: Vec<String> = client(&runner)
            .list_all()
            .unwrap()
            .iter()
            .map(|l| l.alias().to_string())
            .collect();
        assert_eq!(aliases, vec!["smart", "usny", "uklo", "frpa"]);
        assert_eq!(runner.calls(), vec!["list all"]);
    }

    #[test]
    fn lists_recommended_locations() {
        let runner = FakeRunner::with_listings();
        let locations = client(&runner).list_recommended().unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].name(), "USA - New Jersey - 1");
        assert_eq!(locations[1].name(), "UK - London");
        assert_eq!(runner.calls(), vec!["list"]);
    }

    #[test]
    fn finds_by_alias() {
        let runner = FakeRunner::with_listings();
        let client = client(&runner);
        let found = client.find(Listing::All, "usny").unwrap().unwrap();
        assert_eq!(found.name(), "USA - New York");
        assert!(client.find(Listing::All, "dede").unwrap().is_none());
    }

    #[test]
    fn tool_failure_carries_output() {
        let mut runner = FakeRunner::default();
        runner
            .failing
            .insert("list all".into(), "Not activated.\n".into());
        match client(&runner).list_all().unwrap_err() {
            Error::ExternalTool { output, .. } => assert_eq!(output, "Not activated.\n"),
            e => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn connect_passes_alias_verbatim() {
        let runner = FakeRunner::default();
        client(&runner).connect("usnj1").unwrap();
        assert_eq!(runner.calls(), vec!["connect usnj1"]);
    }

    #[test]
    fn verified_connect_rejects_unknown_alias() {
        let runner = FakeRunner::with_listings();
        match client(&runner).connect_verified("dede").unwrap_err() {
            Error::UnknownAlias(alias) => assert_eq!(alias, "dede"),
            e => panic!("unexpected error: {:?}", e),
        }
        assert_eq!(runner.calls(), vec!["list all"]);
    }

    #[test]
    fn verified_connect() {
        let runner = FakeRunner::with_listings();
        let location = client(&runner).connect_verified("frpa").unwrap();
        assert_eq!(location.name(), "France - Paris");
        assert_eq!(runner.calls(), vec!["list all", "connect frpa"]);
    }

    #[test]
    fn random_connect_picks_a_recommended_location() {
        let runner = FakeRunner::with_listings();
        let mut rng = StdRng::seed_from_u64(7);
        let location = client(&runner).random_connect_with(&mut rng).unwrap();

        assert!(["smart", "uklo"].contains(&location.alias()));
        assert_eq!(
            runner.calls(),
            vec!["list".to_string(), format!("connect {}", location.alias())]
        );
    }

    #[test]
    fn random_connect_without_locations() {
        let mut runner = FakeRunner::default();
        runner.outputs.insert("list".into(), "a\nb\nc\nd\ne\n".into());
        match client(&runner).random_connect().unwrap_err() {
            Error::NoLocations => {}
            e => panic!("unexpected error: {:?}", e),
        }
        assert_eq!(runner.calls(), vec!["list"]);
    }

    #[test]
    fn random_connect_surfaces_listing_errors() {
        let mut runner = FakeRunner::default();
        runner.failing.insert("list".into(), "daemon down".into());
        assert!(matches!(
            client(&runner).random_connect(),
            Err(Error::ExternalTool { .. })
        ));
    }

    #[test]
    fn disconnect() {
        let runner = FakeRunner::default();
        client(&runner).disconnect().unwrap();
        assert_eq!(runner.calls(), vec!["disconnect"]);
    }
}
