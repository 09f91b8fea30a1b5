//! План перезапуска superwhisper в виде упорядоченного списка шагов.
//!
//! Каждый шаг помечен политикой обработки отказа:
//! - `Fatal` прерывает план с ошибкой;
//! - `IgnoreFailure` только логирует отказ;
//! - `RetryNext` образует цепочку запасных вариантов: подряд идущие такие шаги
//!   выполняются до первого успешного, остальные пропускаются.

use crate::config::AppConfig;
use crate::error::Result;
use crate::services::identity::AppVariant;
use smallvec::SmallVec;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Пауза между завершением и повторным запуском. Не настраивается.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPolicy {
    IgnoreFailure,
    RetryNext,
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartAction {
    WriteConfig,
    Quit,
    Settle(Duration),
    OpenUrl {
        variant: AppVariant,
        bundle_id: String,
        url: String,
    },
    LaunchByName,
}

impl fmt::Display for RestartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartAction::WriteConfig => write!(f, "запись настроек"),
            RestartAction::Quit => write!(f, "завершение приложения"),
            RestartAction::Settle(delay) => write!(f, "пауза {}мс", delay.as_millis()),
            RestartAction::OpenUrl { variant, bundle_id, url } => {
                write!(f, "открытие {} через {} ({})", url, bundle_id, variant)
            }
            RestartAction::LaunchByName => write!(f, "запуск по имени"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartStep {
    pub action: RestartAction,
    pub policy: StepPolicy,
}

impl RestartStep {
    pub fn new(action: RestartAction, policy: StepPolicy) -> Self {
        Self { action, policy }
    }
}

pub type RestartPlan = SmallVec<[RestartStep; 6]>;

/// Запись → завершение → пауза → запуск (стандартный bundle, Setapp, по имени)
pub fn build_restart_plan(app: &AppConfig) -> RestartPlan {
    let url = app.activation_url();

    let mut plan = RestartPlan::new();
    plan.push(RestartStep::new(RestartAction::WriteConfig, StepPolicy::Fatal));
    plan.push(RestartStep::new(RestartAction::Quit, StepPolicy::IgnoreFailure));
    plan.push(RestartStep::new(
        RestartAction::Settle(SETTLE_DELAY),
        StepPolicy::IgnoreFailure,
    ));
    for variant in AppVariant::ALL {
        plan.push(RestartStep::new(
            RestartAction::OpenUrl {
                variant,
                bundle_id: app.variant(variant).bundle_id.clone(),
                url: url.clone(),
            },
            StepPolicy::RetryNext,
        ));
    }
    plan.push(RestartStep::new(RestartAction::LaunchByName, StepPolicy::RetryNext));
    plan
}

/// Исполнитель отдельных шагов плана
#[async_trait::async_trait]
pub trait StepRunner: Send + Sync {
    async fn run(&self, action: &RestartAction) -> Result<()>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlanReport {
    /// Шаг, на котором завершилась последняя цепочка `RetryNext`
    pub fallback_winner: Option<RestartAction>,
    pub fallback_errors: Vec<String>,
    /// Число цепочек, в которых не сработал ни один шаг
    pub exhausted_chains: usize,
}

pub async fn execute_plan<R>(plan: &[RestartStep], runner: &R) -> Result<PlanReport>
where
    R: StepRunner + ?Sized,
{
    let mut report = PlanReport::default();
    let mut in_chain = false;
    let mut chain_done = false;

    for step in plan {
        if step.policy == StepPolicy::RetryNext {
            if chain_done {
                debug!("Пропуск шага '{}': цепочка уже завершена", step.action);
                continue;
            }
            in_chain = true;
        } else {
            if in_chain && !chain_done {
                report.exhausted_chains += 1;
            }
            in_chain = false;
            chain_done = false;
        }

        match runner.run(&step.action).await {
            Ok(()) => {
                debug!("Шаг '{}' выполнен", step.action);
                if step.policy == StepPolicy::RetryNext {
                    chain_done = true;
                    report.fallback_winner = Some(step.action.clone());
                }
            }
            Err(e) => match step.policy {
                StepPolicy::Fatal => return Err(e),
                StepPolicy::IgnoreFailure => {
                    debug!("Шаг '{}' не удался, игнорируем: {}", step.action, e);
                }
                StepPolicy::RetryNext => {
                    warn!("Шаг '{}' не удался, пробуем следующий: {}", step.action, e);
                    report.fallback_errors.push(format!("{}: {}", step.action, e));
                }
            },
        }
    }

    if in_chain && !chain_done {
        report.exhausted_chains += 1;
    }

    Ok(report)
}
