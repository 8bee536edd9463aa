use crate::{
    cache::BoundedCache,
    label::{
        derive_albedo, derive_alpha, derive_depth, derive_emissive, derive_environment, derive_light, derive_normal,
        derive_refractive, derive_specular, AlbedoLabel, AlphaLabel, DepthLabel, EmissiveLabel, EnvironmentLabel,
        ForwardOpaqueLitLabel, ForwardOpaqueUnlitLabel, ForwardRegularLabel, ForwardTranslucentRefractiveLabel,
        ForwardTranslucentRegularLitLabel, ForwardTranslucentRegularUnlitLabel, ForwardTranslucentSpecularOnlyLabel,
        ForwardTranslucentSpecularOnlyLitLabel, LightLabel, NormalLabel, RefractiveLabel, SpecularLabel,
    },
    options::LabelCacheOptions,
    types::{
        Capabilities, Instance, InstanceId, InstanceTranslucentRefractive, InstanceTranslucentRegular,
        InstanceTranslucentSpecularOnly, Light, LightId, Material, OpaqueMaterial, RegularMaterial, SpecularMaterial,
    },
};

/// Number of entries held by each cache of a [`LabelCache`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct LabelCacheOccupancy {
    pub albedo: usize,
    pub emissive: usize,
    pub environment: usize,
    pub normal: usize,
    pub specular: usize,
    pub depth: usize,
    pub refractive: usize,
    pub light: usize,
    pub alpha_regular: usize,
    pub alpha_specular_only: usize,
    pub forward_regular: usize,
    pub forward_opaque_unlit: usize,
    pub forward_translucent_refractive: usize,
    pub forward_translucent_regular_unlit: usize,
    pub forward_translucent_specular_only: usize,
}

impl LabelCacheOccupancy {
    pub fn total(&self) -> usize {
        let Self {
            albedo,
            emissive,
            environment,
            normal,
            specular,
            depth,
            refractive,
            light,
            alpha_regular,
            alpha_specular_only,
            forward_regular,
            forward_opaque_unlit,
            forward_translucent_refractive,
            forward_translucent_regular_unlit,
            forward_translucent_specular_only,
        } = *self;

        albedo
            + emissive
            + environment
            + normal
            + specular
            + depth
            + refractive
            + light
            + alpha_regular
            + alpha_specular_only
            + forward_regular
            + forward_opaque_unlit
            + forward_translucent_refractive
            + forward_translucent_regular_unlit
            + forward_translucent_specular_only
    }
}

/// Memoizes the labels of instances and lights under their identity.
///
/// Every cache is bounded by [`LabelCacheOptions::max_entries`] and evicts the
/// least recently used label when full. Composite labels are built from leaf
/// labels fetched through this same cache, so a composite and its constituents
/// always agree. Labels pairing a light with an instance are composed on every
/// call and never stored.
#[derive(Debug)]
pub struct LabelCache {
    capabilities: Capabilities,

    albedo: BoundedCache<InstanceId, AlbedoLabel>,
    emissive: BoundedCache<InstanceId, EmissiveLabel>,
    environment: BoundedCache<InstanceId, EnvironmentLabel>,
    normal: BoundedCache<InstanceId, NormalLabel>,
    specular: BoundedCache<InstanceId, SpecularLabel>,
    depth: BoundedCache<InstanceId, DepthLabel>,
    refractive: BoundedCache<InstanceId, RefractiveLabel>,
    light: BoundedCache<LightId, LightLabel>,
    alpha_regular: BoundedCache<InstanceId, AlphaLabel>,
    alpha_specular_only: BoundedCache<InstanceId, AlphaLabel>,

    forward_regular: BoundedCache<InstanceId, ForwardRegularLabel>,
    forward_opaque_unlit: BoundedCache<InstanceId, ForwardOpaqueUnlitLabel>,
    forward_translucent_refractive: BoundedCache<InstanceId, ForwardTranslucentRefractiveLabel>,
    forward_translucent_regular_unlit: BoundedCache<InstanceId, ForwardTranslucentRegularUnlitLabel>,
    forward_translucent_specular_only: BoundedCache<InstanceId, ForwardTranslucentSpecularOnlyLabel>,
}

impl LabelCache {
    pub fn new(options: LabelCacheOptions) -> Self {
        let LabelCacheOptions {
            capabilities,
            max_entries,
        } = options;

        log::debug!(
            "Creating label caches with {} entries each, capabilities {:?}",
            max_entries,
            capabilities
        );

        Self {
            capabilities,

            albedo: BoundedCache::new("albedo", max_entries),
            emissive: BoundedCache::new("emissive", max_entries),
            environment: BoundedCache::new("environment", max_entries),
            normal: BoundedCache::new("normal", max_entries),
            specular: BoundedCache::new("specular", max_entries),
            depth: BoundedCache::new("depth", max_entries),
            refractive: BoundedCache::new("refractive", max_entries),
            light: BoundedCache::new("light", max_entries),
            alpha_regular: BoundedCache::new("alpha regular", max_entries),
            alpha_specular_only: BoundedCache::new("alpha specular-only", max_entries),

            forward_regular: BoundedCache::new("forward regular", max_entries),
            forward_opaque_unlit: BoundedCache::new("forward opaque unlit", max_entries),
            forward_translucent_refractive: BoundedCache::new("forward translucent refractive", max_entries),
            forward_translucent_regular_unlit: BoundedCache::new("forward translucent regular unlit", max_entries),
            forward_translucent_specular_only: BoundedCache::new("forward translucent specular-only", max_entries),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn albedo<M: RegularMaterial>(&mut self, instance: &Instance<M>) -> AlbedoLabel {
        self.albedo.get_or_insert_with(instance.id(), || {
            derive_albedo(instance.mesh(), &instance.material().regular().albedo)
        })
    }

    pub fn emissive<M: RegularMaterial>(&mut self, instance: &Instance<M>) -> EmissiveLabel {
        self.emissive.get_or_insert_with(instance.id(), || {
            derive_emissive(instance.mesh(), &instance.material().regular().emissive)
        })
    }

    pub fn environment<M: RegularMaterial>(&mut self, instance: &Instance<M>) -> EnvironmentLabel {
        self.environment.get_or_insert_with(instance.id(), || {
            derive_environment(instance.mesh(), &instance.material().regular().environment)
        })
    }

    pub fn normal<M: Material>(&mut self, instance: &Instance<M>) -> NormalLabel {
        self.normal
            .get_or_insert_with(instance.id(), || derive_normal(instance.mesh(), instance.material().normal()))
    }

    pub fn specular<M: SpecularMaterial>(&mut self, instance: &Instance<M>) -> SpecularLabel {
        self.specular
            .get_or_insert_with(instance.id(), || derive_specular(instance.mesh(), instance.material().specular()))
    }

    pub fn depth<M: OpaqueMaterial>(&mut self, instance: &Instance<M>) -> DepthLabel {
        if let Some(depth) = self.depth.get(&instance.id()) {
            return depth;
        }
        let albedo = self.albedo(instance);
        let depth = derive_depth(albedo, instance.material().alpha_threshold());
        self.depth.insert(instance.id(), depth);
        depth
    }

    pub fn refractive(&mut self, instance: &InstanceTranslucentRefractive) -> RefractiveLabel {
        self.refractive
            .get_or_insert_with(instance.id(), || derive_refractive(&instance.material().refractive))
    }

    pub fn light(&mut self, light: &Light) -> LightLabel {
        let capabilities = self.capabilities;
        self.light
            .get_or_insert_with(light.id(), || derive_light(light, capabilities))
    }

    pub fn alpha_regular(&mut self, instance: &InstanceTranslucentRegular) -> AlphaLabel {
        if let Some(alpha) = self.alpha_regular.get(&instance.id()) {
            return alpha;
        }
        let normal = self.normal(instance);
        let alpha = derive_alpha(instance.mesh(), normal, &instance.material().alpha);
        self.alpha_regular.insert(instance.id(), alpha);
        alpha
    }

    pub fn alpha_specular_only(&mut self, instance: &InstanceTranslucentSpecularOnly) -> AlphaLabel {
        if let Some(alpha) = self.alpha_specular_only.get(&instance.id()) {
            return alpha;
        }
        let normal = self.normal(instance);
        let alpha = derive_alpha(instance.mesh(), normal, &instance.material().alpha);
        self.alpha_specular_only.insert(instance.id(), alpha);
        alpha
    }

    pub fn forward_regular<M: RegularMaterial>(&mut self, instance: &Instance<M>) -> ForwardRegularLabel {
        if let Some(label) = self.forward_regular.get(&instance.id()) {
            return label;
        }
        profiling::scope!("LabelCache::forward_regular");

        let label = ForwardRegularLabel {
            albedo: self.albedo(instance),
            emissive: self.emissive(instance),
            environment: self.environment(instance),
            normal: self.normal(instance),
            specular: self.specular(instance),
        };
        self.forward_regular.insert(instance.id(), label);
        label
    }

    pub fn forward_opaque_unlit<M: OpaqueMaterial>(&mut self, instance: &Instance<M>) -> ForwardOpaqueUnlitLabel {
        if let Some(label) = self.forward_opaque_unlit.get(&instance.id()) {
            return label;
        }
        profiling::scope!("LabelCache::forward_opaque_unlit");

        let label = ForwardOpaqueUnlitLabel {
            albedo: self.albedo(instance),
            environment: self.environment(instance),
            normal: self.normal(instance),
        };
        self.forward_opaque_unlit.insert(instance.id(), label);
        label
    }

    pub fn forward_translucent_refractive(
        &mut self,
        instance: &InstanceTranslucentRefractive,
    ) -> ForwardTranslucentRefractiveLabel {
        if let Some(label) = self.forward_translucent_refractive.get(&instance.id()) {
            return label;
        }
        profiling::scope!("LabelCache::forward_translucent_refractive");

        let label = ForwardTranslucentRefractiveLabel {
            refractive: self.refractive(instance),
            normal: self.normal(instance),
        };
        self.forward_translucent_refractive.insert(instance.id(), label);
        label
    }

    pub fn forward_translucent_regular_unlit(
        &mut self,
        instance: &InstanceTranslucentRegular,
    ) -> ForwardTranslucentRegularUnlitLabel {
        if let Some(label) = self.forward_translucent_regular_unlit.get(&instance.id()) {
            return label;
        }
        profiling::scope!("LabelCache::forward_translucent_regular_unlit");

        let label = ForwardTranslucentRegularUnlitLabel {
            albedo: self.albedo(instance),
            environment: self.environment(instance),
            normal: self.normal(instance),
            alpha: self.alpha_regular(instance),
        };
        self.forward_translucent_regular_unlit.insert(instance.id(), label);
        label
    }

    pub fn forward_translucent_specular_only(
        &mut self,
        instance: &InstanceTranslucentSpecularOnly,
    ) -> ForwardTranslucentSpecularOnlyLabel {
        if let Some(label) = self.forward_translucent_specular_only.get(&instance.id()) {
            return label;
        }
        profiling::scope!("LabelCache::forward_translucent_specular_only");

        let label = ForwardTranslucentSpecularOnlyLabel {
            normal: self.normal(instance),
            specular: self.specular(instance),
        };
        self.forward_translucent_specular_only.insert(instance.id(), label);
        label
    }

    /// Not stored: the light and instance pairing changes with batching.
    pub fn forward_opaque_lit<M: OpaqueMaterial>(&mut self, light: &Light, instance: &Instance<M>) -> ForwardOpaqueLitLabel {
        ForwardOpaqueLitLabel {
            light: self.light(light),
            regular: self.forward_regular(instance),
        }
    }

    /// Not stored, like [`LabelCache::forward_opaque_lit`].
    pub fn forward_translucent_regular_lit(
        &mut self,
        light: &Light,
        instance: &InstanceTranslucentRegular,
    ) -> ForwardTranslucentRegularLitLabel {
        ForwardTranslucentRegularLitLabel {
            light: self.light(light),
            regular: self.forward_regular(instance),
            alpha: self.alpha_regular(instance),
        }
    }

    /// Not stored, like [`LabelCache::forward_opaque_lit`].
    pub fn forward_translucent_specular_only_lit(
        &mut self,
        light: &Light,
        instance: &InstanceTranslucentSpecularOnly,
    ) -> ForwardTranslucentSpecularOnlyLitLabel {
        ForwardTranslucentSpecularOnlyLitLabel {
            light: self.light(light),
            specular_only: self.forward_translucent_specular_only(instance),
            alpha: self.alpha_specular_only(instance),
        }
    }

    /// Total number of labels held across every cache.
    pub fn size(&self) -> usize {
        self.occupancy().total()
    }

    pub fn occupancy(&self) -> LabelCacheOccupancy {
        LabelCacheOccupancy {
            albedo: self.albedo.len(),
            emissive: self.emissive.len(),
            environment: self.environment.len(),
            normal: self.normal.len(),
            specular: self.specular.len(),
            depth: self.depth.len(),
            refractive: self.refractive.len(),
            light: self.light.len(),
            alpha_regular: self.alpha_regular.len(),
            alpha_specular_only: self.alpha_specular_only.len(),
            forward_regular: self.forward_regular.len(),
            forward_opaque_unlit: self.forward_opaque_unlit.len(),
            forward_translucent_refractive: self.forward_translucent_refractive.len(),
            forward_translucent_regular_unlit: self.forward_translucent_regular_unlit.len(),
            forward_translucent_specular_only: self.forward_translucent_specular_only.len(),
        }
    }

    /// Drops every label stored for `id`.
    pub fn forget_instance(&mut self, id: InstanceId) {
        self.albedo.remove(&id);
        self.emissive.remove(&id);
        self.environment.remove(&id);
        self.normal.remove(&id);
        self.specular.remove(&id);
        self.depth.remove(&id);
        self.refractive.remove(&id);
        self.alpha_regular.remove(&id);
        self.alpha_specular_only.remove(&id);
        self.forward_regular.remove(&id);
        self.forward_opaque_unlit.remove(&id);
        self.forward_translucent_refractive.remove(&id);
        self.forward_translucent_regular_unlit.remove(&id);
        self.forward_translucent_specular_only.remove(&id);
    }

    pub fn forget_light(&mut self, id: LightId) {
        self.light.remove(&id);
    }

    pub fn clear(&mut self) {
        log::debug!("Clearing {} cached labels", self.size());

        self.albedo.clear();
        self.emissive.clear();
        self.environment.clear();
        self.normal.clear();
        self.specular.clear();
        self.depth.clear();
        self.refractive.clear();
        self.light.clear();
        self.alpha_regular.clear();
        self.alpha_specular_only.clear();
        self.forward_regular.clear();
        self.forward_opaque_unlit.clear();
        self.forward_translucent_refractive.clear();
        self.forward_translucent_regular_unlit.clear();
        self.forward_translucent_specular_only.clear();
    }
}

impl Default for LabelCache {
    fn default() -> Self {
        Self::new(LabelCacheOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use glam::{Vec3, Vec4};

    use super::LabelCache;
    use crate::{
        label::{AlbedoLabel, AlphaLabel, DepthLabel, LightLabel, NormalLabel},
        options::LabelCacheOptions,
        types::{
            AlbedoComponent, AlphaComponent, Capabilities, InstanceOpaqueAlphaDepth, InstanceOpaqueRegular, Light,
            InstanceTranslucentRegular, LightDirectional, MaterialOpaqueAlphaDepth, MaterialOpaqueRegular,
            MaterialRegular, MaterialTranslucentRegular, MeshFeatures, RawTexture2DHandle,
        },
    };

    fn textured() -> MaterialRegular {
        MaterialRegular {
            albedo: AlbedoComponent::textured(RawTexture2DHandle::new(3)),
            ..Default::default()
        }
    }

    #[test]
    fn repeated_lookup_does_not_grow() {
        let mut cache = LabelCache::default();
        let instance = InstanceOpaqueRegular::new(MeshFeatures::all(), MaterialOpaqueRegular { regular: textured() });

        assert_eq!(cache.albedo(&instance), AlbedoLabel::Textured);
        let size = cache.size();
        assert_eq!(cache.albedo(&instance), AlbedoLabel::Textured);
        assert_eq!(cache.size(), size);
        assert_eq!(cache.occupancy().albedo, 1);
    }

    #[test]
    fn composite_fills_leaf_caches() {
        let mut cache = LabelCache::default();
        let instance = InstanceOpaqueRegular::new(MeshFeatures::NORMALS, MaterialOpaqueRegular::default());

        let label = cache.forward_regular(&instance);
        let occupancy = cache.occupancy();
        assert_eq!(occupancy.forward_regular, 1);
        assert_eq!(occupancy.albedo, 1);
        assert_eq!(occupancy.specular, 1);
        assert_eq!(occupancy.depth, 0);
        assert_eq!(label.normal, NormalLabel::Vertex);
        assert_eq!(cache.size(), 6);
    }

    #[test]
    fn depth_reuses_albedo() {
        let mut cache = LabelCache::default();
        let material = MaterialOpaqueAlphaDepth {
            regular: MaterialRegular {
                albedo: AlbedoComponent::color(Vec4::new(1.0, 1.0, 1.0, 0.5)),
                ..Default::default()
            },
            alpha_threshold: 0.5,
        };
        let instance = InstanceOpaqueAlphaDepth::new(MeshFeatures::all(), material);

        assert_eq!(cache.depth(&instance), DepthLabel::Uniform);
        assert_eq!(cache.occupancy().albedo, 1);
        assert_eq!(cache.depth(&instance), DepthLabel::Uniform);
        assert_eq!(cache.size(), 2);
    }

    #[test]
    fn lit_labels_are_not_stored() {
        let mut cache = LabelCache::new(LabelCacheOptions {
            capabilities: Capabilities::all(),
            ..Default::default()
        });
        let light: Light = LightDirectional::new(Vec3::NEG_Y).into();
        let instance = InstanceTranslucentRegular::new(
            MeshFeatures::NORMALS,
            MaterialTranslucentRegular {
                alpha: AlphaComponent::OneMinusDot { factor: 2.0 },
                ..Default::default()
            },
        );

        let lit = cache.forward_translucent_regular_lit(&light, &instance);
        assert_eq!(lit.light, LightLabel::Directional);
        assert_eq!(lit.alpha, AlphaLabel::OneMinusDot);
        let size = cache.size();
        cache.forward_translucent_regular_lit(&light, &instance);
        assert_eq!(cache.size(), size);
        assert_eq!(cache.occupancy().light, 1);
    }

    #[test]
    fn each_cache_is_bounded() {
        let mut cache = LabelCache::new(LabelCacheOptions {
            max_entries: NonZeroUsize::new(2).unwrap(),
            ..Default::default()
        });
        let instances: Vec<_> = (0..3)
            .map(|_| InstanceOpaqueRegular::new(MeshFeatures::all(), MaterialOpaqueRegular::default()))
            .collect();
        for instance in &instances {
            cache.forward_opaque_unlit(instance);
        }

        let occupancy = cache.occupancy();
        assert_eq!(occupancy.albedo, 2);
        assert_eq!(occupancy.forward_opaque_unlit, 2);
        assert_eq!(cache.size(), 8);
    }

    #[test]
    fn forget_and_clear() {
        let mut cache = LabelCache::default();
        let a = InstanceOpaqueRegular::new(MeshFeatures::all(), MaterialOpaqueRegular::default());
        let b = InstanceOpaqueRegular::new(MeshFeatures::all(), MaterialOpaqueRegular::default());
        let light: Light = LightDirectional::new(Vec3::NEG_Y).into();

        cache.forward_opaque_lit(&light, &a);
        cache.forward_opaque_lit(&light, &b);
        assert_eq!(cache.size(), 13);

        cache.forget_instance(a.id());
        assert_eq!(cache.size(), 7);
        cache.forget_light(light.id());
        assert_eq!(cache.size(), 6);

        cache.clear();
        assert_eq!(cache.size(), 0);
    }
}
