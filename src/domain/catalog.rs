//! Built-in workstation steps.

use crate::domain::action::{Action, PathSpec};
use crate::domain::release::{AssetPattern, RepoSlug};
use crate::domain::step::{Step, StepName};
use crate::domain::{AppError, PackageTarget};

pub const VIM: &str = "vim";
pub const NEOVIM: &str = "neovim";
pub const TMUX: &str = "tmux";
pub const POWERLINE: &str = "powerline";
pub const GDB: &str = "gdb";

/// Step names in declaration order.
pub const STEP_ORDER: [&str; 5] = [VIM, NEOVIM, TMUX, POWERLINE, GDB];

const TPM_URL: &str = "https://github.com/tmux-plugins/tpm";
const POWERLINE_GLOBAL_CONFIG: &str = "/usr/share/powerline/config_files";

/// Build the ordered workstation steps for a package manager target.
pub fn workstation_steps(target: PackageTarget) -> Result<Vec<Step>, AppError> {
    Ok(vec![vim(target)?, neovim()?, tmux()?, powerline(target)?, gdb()?])
}

fn vim(target: PackageTarget) -> Result<Step, AppError> {
    let package = match target {
        PackageTarget::Apt => "vim",
        PackageTarget::Dnf => "vim-enhanced",
    };

    Ok(Step::new(
        StepName::new(VIM)?,
        "Vim with the bundled vimrc",
        vec![
            Action::install(package),
            Action::copy(PathSpec::dist("vimrc"), PathSpec::home(".vimrc")),
        ],
    ))
}

fn neovim() -> Result<Step, AppError> {
    let mut actions: Vec<Action> =
        ["git", "curl", "tar", "unzip"].into_iter().map(Action::install).collect();

    actions.extend([
        Action::fetch(
            RepoSlug::new("neovim/neovim")?,
            AssetPattern::new(["linux", "x86_64"], ".tar.gz"),
            "nvim.tar.gz",
        ),
        Action::extract("nvim.tar.gz", PathSpec::home(".local/opt/nvim"), 1),
        Action::link(PathSpec::home(".local/opt/nvim/bin/nvim"), PathSpec::home(".local/bin/nvim")),
        Action::fetch(
            RepoSlug::new("clangd/clangd")?,
            AssetPattern::new(["clangd-linux"], ".zip"),
            "clangd.zip",
        ),
        Action::extract("clangd.zip", PathSpec::home(".local/opt/clangd"), 1),
        Action::link(
            PathSpec::home(".local/opt/clangd/bin/clangd"),
            PathSpec::home(".local/bin/clangd"),
        ),
        Action::copy(PathSpec::dist("nvim"), PathSpec::home(".config/nvim")),
    ]);

    Ok(Step::new(StepName::new(NEOVIM)?, "Neovim and clangd release binaries with config", actions))
}

fn tmux() -> Result<Step, AppError> {
    Ok(Step::new(
        StepName::new(TMUX)?,
        "tmux with the bundled config and plugin manager",
        vec![
            Action::install("tmux"),
            Action::copy(PathSpec::dist("tmux.conf"), PathSpec::home(".tmux.conf")),
            Action::clone_repo(TPM_URL, PathSpec::home(".tmux/plugins/tpm")),
        ],
    ))
}

fn powerline(target: PackageTarget) -> Result<Step, AppError> {
    let fonts = match target {
        PackageTarget::Apt => "fonts-powerline",
        PackageTarget::Dnf => "powerline-fonts",
    };

    Ok(Step::new(
        StepName::new(POWERLINE)?,
        "Powerline status line and fonts",
        vec![
            Action::install("powerline"),
            Action::install(fonts),
            Action::copy_if_present(
                PathSpec::absolute(POWERLINE_GLOBAL_CONFIG),
                PathSpec::home(".config/powerline"),
            ),
        ],
    ))
}

fn gdb() -> Result<Step, AppError> {
    Ok(Step::new(
        StepName::new(GDB)?,
        "GDB with the bundled gdbinit",
        vec![
            Action::install("gdb"),
            Action::copy(PathSpec::dist("gdbinit"), PathSpec::home(".gdbinit")),
        ],
    ))
}
