//! CLI runner, executes commands

use crate::auth::TokenProvider;
use crate::cli::commands::{Cli, Commands};
use crate::config::Settings;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::service::{BlobStore, ContainerClient, ListOptions};
use futures::StreamExt;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

const SAMPLE_CONTENTS: &str = "Hello Azure!";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let store = self.connect()?;
        let container = store.container(&self.cli.container);

        match &self.cli.command {
            Commands::Put { blob, source } => {
                ensure_container(&container).await?;
                self.put(&container, blob, source.as_deref()).await
            }
            Commands::List { max_results } => {
                ensure_container(&container).await?;
                let container =
                    container.with_list_options(ListOptions::with_max_results(*max_results));
                self.list(&container).await
            }
            Commands::Get { blob, output } => {
                ensure_container(&container).await?;
                self.get(&container, blob, output.as_deref()).await
            }
            Commands::Delete { blob } => {
                ensure_container(&container).await?;
                self.delete(&container, blob).await
            }
            Commands::Cleanup => self.cleanup(&container).await,
            Commands::Shell => {
                ensure_container(&container).await?;
                self.shell(&container).await
            }
        }
    }

    /// Build an authenticated store client from the settings file
    fn connect(&self) -> Result<BlobStore> {
        let settings = Settings::load(self.cli.settings.as_deref())?;
        let provider = TokenProvider::client_credentials(
            settings.token_url(),
            &settings.client_id,
            &settings.client_secret,
        )
        .with_resource(settings.resource());

        let http = HttpClient::with_auth(HttpClientConfig::default(), provider);
        BlobStore::new(settings.account_endpoint(), http)
    }

    async fn put(
        &self,
        container: &ContainerClient,
        blob: &str,
        source: Option<&Path>,
    ) -> Result<()> {
        let handle = container.blob(blob);
        println!(
            "Uploading the sample file into the container: {}",
            container.url()
        );
        match source {
            Some(path) => handle.upload_file(path).await,
            None => {
                let (_dir, path) = create_sample_file()?;
                handle.upload_file(&path).await
            }
        }
    }

    async fn list(&self, container: &ContainerClient) -> Result<()> {
        println!("Listing blobs in the container: {}", container.url());
        let mut stream = std::pin::pin!(container.list());
        let mut count = 0usize;
        while let Some(item) = stream.next().await {
            let item = item?;
            println!("{item}");
            count += 1;
        }
        if count == 0 {
            println!("There are no more blobs to list off.");
        }
        println!("Completed list blobs request.");
        Ok(())
    }

    async fn get(
        &self,
        container: &ContainerClient,
        blob: &str,
        output: Option<&Path>,
    ) -> Result<()> {
        let handle = container.blob(blob);
        println!("Get the blob: {}", handle.url());
        let target = match output {
            Some(path) => path.to_path_buf(),
            None => std::env::temp_dir().join(format!("downloaded-{blob}")),
        };
        handle.download_to_file(&target).await?;
        println!("Completed download request.");
        Ok(())
    }

    async fn delete(&self, container: &ContainerClient, blob: &str) -> Result<()> {
        let handle = container.blob(blob);
        println!("Delete the blob: {}", handle.url());
        handle.delete().await
    }

    async fn cleanup(&self, container: &ContainerClient) -> Result<()> {
        println!("Cleaning up the sample and exiting!");
        container.delete().await
    }

    /// Interactive loop over stdin, one letter per command
    async fn shell(&self, container: &ContainerClient) -> Result<()> {
        let sample = create_sample_file()?;

        println!("Enter a command");
        println!("(P)utBlob | (L)istBlobs | (G)etBlob | (D)eleteBlobs | (E)xitSample");

        let stdin = std::io::stdin();
        loop {
            print!("# Enter a command : ");
            std::io::stdout().flush()?;

            let mut input = String::new();
            if stdin.read_line(&mut input)? == 0 {
                break;
            }

            // Report the failure and keep the loop alive
            let outcome = match input.trim().to_uppercase().as_str() {
                "P" => {
                    self.put(container, "SampleBlob.txt", Some(sample.1.as_path()))
                        .await
                }
                "L" => self.list(container).await,
                "G" => self.get(container, "SampleBlob.txt", None).await,
                "D" => self.delete(container, "SampleBlob.txt").await,
                "E" => {
                    self.cleanup(container).await?;
                    break;
                }
                other => {
                    println!("Unknown command: {other}");
                    Ok(())
                }
            };
            if let Err(e) = outcome {
                println!(">> An error was encountered: {e}");
            }
        }
        Ok(())
    }
}

/// Create the container if it does not exist yet
async fn ensure_container(container: &ContainerClient) -> Result<()> {
    container.create().await?;
    Ok(())
}

/// Write a small greeting file into a fresh temporary directory
///
/// The directory guard is returned alongside the path so the file
/// lives as long as the caller holds it.
fn create_sample_file() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sampleFile.txt");
    std::fs::write(&path, SAMPLE_CONTENTS)?;
    info!(">> Creating a sample file at: {}", path.display());
    Ok((dir, path))
}
