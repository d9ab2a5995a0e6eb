//! The command router: a tokenized input line mapped onto one operation.
//!
//! Pure parsing, no IO. Wrong argument counts become `Usage` values and an
//! unrecognized keyword becomes `Unknown`, so the shell prints a hint and
//! nothing else runs.

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Connect {
        url: String,
        credentials: Option<String>,
    },
    RemoteList,
    RemoteCd { name: String },
    RemoteMkdir { name: String },
    RemoteRemove { name: String, is_directory: bool },
    Download { remote: String, local: String },
    Upload { local: String, remote: String },
    LocalList,
    LocalCd { path: String },
    LocalMkdir { path: String },
    LocalRemove { path: String },
    LocalMove { from: String, to: String },
    Help,
    Exit,
    /// Blank input line; the shell just re-prompts
    Empty,
    /// Right keyword, wrong argument count
    Usage(&'static str),
    Unknown(String),
}

impl Command {
    /// Tokenize on whitespace runs; only the command word is lower-cased,
    /// arguments keep their case
    pub fn parse(line: &str) -> Self {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((keyword, args)) = tokens.split_first() else {
            return Command::Empty;
        };

        match (keyword.to_lowercase().as_str(), args) {
            ("connect", [url]) => Command::Connect {
                url: url.to_string(),
                credentials: None,
            },
            ("connect", [url, userpass]) => Command::Connect {
                url: url.to_string(),
                credentials: Some(userpass.to_string()),
            },
            ("connect", _) => Command::Usage("connect <url> [user:password]"),

            ("ls" | "dir", []) => Command::RemoteList,
            ("ls" | "dir", _) => Command::Usage("ls"),
            ("cd", [name]) => Command::RemoteCd {
                name: name.to_string(),
            },
            ("cd", _) => Command::Usage("cd <directory_name>"),
            ("mkdir", [name]) => Command::RemoteMkdir {
                name: name.to_string(),
            },
            ("mkdir", _) => Command::Usage("mkdir <directory_name>"),
            ("rm", [name, flag]) => match kind_flag(flag) {
                Some(is_directory) => Command::RemoteRemove {
                    name: name.to_string(),
                    is_directory,
                },
                None => Command::Usage("rm <name> <is_dir(0|1)>"),
            },
            ("rm", _) => Command::Usage("rm <name> <is_dir(0|1)>"),
            ("get", [remote, local]) => Command::Download {
                remote: remote.to_string(),
                local: local.to_string(),
            },
            ("get", _) => Command::Usage("get <remote_file> <local_file>"),
            ("put", [local, remote]) => Command::Upload {
                local: local.to_string(),
                remote: remote.to_string(),
            },
            ("put", _) => Command::Usage("put <local_file> <remote_file>"),

            ("lls" | "ldir", []) => Command::LocalList,
            ("lls" | "ldir", _) => Command::Usage("lls"),
            ("lcd", [path]) => Command::LocalCd {
                path: path.to_string(),
            },
            ("lcd", _) => Command::Usage("lcd <directory_name>"),
            ("lmkdir", [path]) => Command::LocalMkdir {
                path: path.to_string(),
            },
            ("lmkdir", _) => Command::Usage("lmkdir <directory_name>"),
            ("lrm", [path]) => Command::LocalRemove {
                path: path.to_string(),
            },
            ("lrm", _) => Command::Usage("lrm <path>"),
            ("lmv", [from, to]) => Command::LocalMove {
                from: from.to_string(),
                to: to.to_string(),
            },
            ("lmv", _) => Command::Usage("lmv <from_path> <to_path>"),

            ("help", []) => Command::Help,
            ("help", _) => Command::Usage("help"),
            ("exit", []) => Command::Exit,
            ("exit", _) => Command::Usage("exit"),

            _ => Command::Unknown(keyword.to_string()),
        }
    }
}

/// The delete commands take the entry kind from the caller: 1/true for a
/// directory, 0/false for a file
fn kind_flag(flag: &str) -> Option<bool> {
    match flag {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

pub const HELP: &str = "\
Remote commands (FTP):
  connect <url> [user:password]   Connect to an FTP server (e.g. connect ftp://demo.wftpserver.com demo:demo)
  ls / dir                        List the remote directory
  cd <directory_name>             Change the remote directory (.. goes up)
  mkdir <directory_name>          Create a remote directory
  rm <name> <is_dir(0|1)>         Delete a remote file or directory
  get <remote_file> <local_file>  Download a file
  put <local_file> <remote_file>  Upload a file
Local commands:
  lls / ldir                      List the local directory
  lcd <directory_name>            Change the local directory
  lmkdir <directory_name>         Create a local directory
  lrm <path>                      Delete a local file or empty directory
  lmv <from_path> <to_path>       Move or rename a local file or directory
General commands:
  help                            Show this reference
  exit                            Quit";
