//! Read-only view over a finished resolve run.

use serde::Serialize;

use crate::timers::ResolvePhases;
use crate::types::{ParamMap, ParamStats, Resource, Template};

/// The concrete template together with what produced it.
///
/// Every resource in [`ResolvedTemplate::template`] carries an `Id` and an `Arn`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTemplate {
    template: Template,
    #[serde(skip)]
    original: Template,
    params: ParamMap,
    stats: ParamStats,
    phases: ResolvePhases,
}

impl ResolvedTemplate {
    pub(crate) fn new(
        template: Template,
        original: Template,
        params: ParamMap,
        stats: ParamStats,
        phases: ResolvePhases,
    ) -> Self {
        Self {
            template,
            original,
            params,
            stats,
            phases,
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// The template as parsed, before any intrinsic was evaluated.
    pub fn original(&self) -> &Template {
        &self.original
    }

    /// Merged parameter values the run resolved against.
    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    pub fn stats(&self) -> &ParamStats {
        &self.stats
    }

    pub fn phases(&self) -> &ResolvePhases {
        &self.phases
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.template.resource(logical_id)
    }

    pub fn original_resource(&self, logical_id: &str) -> Option<&Resource> {
        self.original.resource(logical_id)
    }

    pub fn resource_by_physical_id(&self, id: &str) -> Option<(&str, &Resource)> {
        self.resources()
            .find(|(_, resource)| resource.id.as_deref() == Some(id))
    }

    pub fn resource_by_arn(&self, arn: &str) -> Option<(&str, &Resource)> {
        self.resources()
            .find(|(_, resource)| resource.arn.as_deref() == Some(arn))
    }

    /// Resources of one type, in document order.
    pub fn resources_of_type(&self, resource_type: &str) -> Vec<(&str, &Resource)> {
        self.find_resources(resource_type, |_, _| true)
    }

    /// Resources of one type for which `predicate` holds, in document order.
    pub fn find_resources<P>(&self, resource_type: &str, predicate: P) -> Vec<(&str, &Resource)>
    where
        P: Fn(&str, &Resource) -> bool,
    {
        self.resources()
            .filter(|&(logical_id, resource)| {
                resource.resource_type == resource_type && predicate(logical_id, resource)
            })
            .collect()
    }

    fn resources(&self) -> impl Iterator<Item = (&str, &Resource)> {
        self.template
            .resources
            .iter()
            .map(|(logical_id, resource)| (logical_id.as_str(), resource))
    }
}
