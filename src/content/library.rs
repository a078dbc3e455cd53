//! Reference content compiled into the binary
//!
//! Each body is Markdown. Fenced code blocks become copyable code blocks,
//! numbered per section in order of appearance.

/// Markdown body for one registry section
#[derive(Debug, Clone, Copy)]
pub struct SectionBody {
    pub id: &'static str,
    pub markdown: &'static str,
}

pub const SECTION_BODIES: &[SectionBody] = &[
    SectionBody {
        id: "overview",
        markdown: r##"
This handbook collects the pipeline and cluster conventions used across our
services. Every section is self-contained; use the sidebar to jump around or
`/` to filter topics.

- **CI/CD**: how code moves from a pull request to production.
- **Containers**: how images are built, tagged and scanned.
- **Kubernetes**: how workloads are described, exposed and configured.

Press `y` on a highlighted code block to copy it.

```bash
git clone https://github.com/example/platform-handbook.git
cd platform-handbook
```
"##,
    },
    SectionBody {
        id: "cicd-basics",
        markdown: r##"
Continuous integration runs the test suite on every push. Continuous delivery
keeps the main branch releasable; continuous deployment ships every green
build automatically.

## Pipeline stages

1. Lint and unit test
2. Build the container image
3. Scan the image for vulnerabilities
4. Deploy to staging, run smoke tests
5. Promote to production

Keep stages fast. A pipeline that takes longer than ten minutes gets skipped.

```yaml
stages:
  - test
  - build
  - scan
  - deploy
```
"##,
    },
    SectionBody {
        id: "github-actions",
        markdown: r##"
Workflows live in `.github/workflows/`. Each workflow is triggered by events
and runs one or more jobs on hosted or self-hosted runners.

```yaml
name: ci
on:
  push:
    branches: [main]
  pull_request:

jobs:
  test:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - uses: actions/setup-node@v4
        with:
          node-version: 20
          cache: npm
      - run: npm ci
      - run: npm test
```

## Caching

Cache dependency directories keyed on the lockfile hash so cache hits are
exact.

```yaml
- uses: actions/cache@v4
  with:
    path: ~/.npm
    key: npm-${{ hashFiles('package-lock.json') }}
```
"##,
    },
    SectionBody {
        id: "docker",
        markdown: r##"
Images are built once per commit and tagged with the short SHA. The `latest`
tag is never deployed.

```bash
docker build -t registry.example.com/api:$(git rev-parse --short HEAD) .
docker push registry.example.com/api:$(git rev-parse --short HEAD)
```

## Inspecting images

```bash
docker image ls
docker history registry.example.com/api:abc1234
```
"##,
    },
    SectionBody {
        id: "dockerfile-best-practices",
        markdown: r##"
- Use multi-stage builds so build tooling never reaches the runtime image.
- Pin base images by digest or exact version.
- Run as a non-root user.
- Order layers from least to most frequently changed.

```dockerfile
FROM node:20-alpine AS build
WORKDIR /app
COPY package*.json ./
RUN npm ci
COPY . .
RUN npm run build

FROM node:20-alpine
WORKDIR /app
COPY --from=build /app/dist ./dist
COPY --from=build /app/node_modules ./node_modules
USER node
EXPOSE 3000
CMD ["node", "dist/server.js"]
```
"##,
    },
    SectionBody {
        id: "k8s-basics",
        markdown: r##"
A **Pod** is the smallest deployable unit: one or more containers sharing a
network namespace. Pods are disposable; controllers recreate them.

```bash
kubectl get pods
kubectl describe pod api-7d4b9c6f5-xk2lp
kubectl logs -f api-7d4b9c6f5-xk2lp
```

## Namespaces

Namespaces scope names and quotas. Each team owns one namespace per
environment.

```bash
kubectl create namespace payments-staging
kubectl config set-context --current --namespace=payments-staging
```
"##,
    },
    SectionBody {
        id: "k8s-deployments",
        markdown: r##"
A Deployment manages a ReplicaSet and performs rolling updates.

```yaml
apiVersion: apps/v1
kind: Deployment
metadata:
  name: api
spec:
  replicas: 3
  selector:
    matchLabels:
      app: api
  strategy:
    rollingUpdate:
      maxSurge: 1
      maxUnavailable: 0
  template:
    metadata:
      labels:
        app: api
    spec:
      containers:
        - name: api
          image: registry.example.com/api:abc1234
          ports:
            - containerPort: 3000
          readinessProbe:
            httpGet:
              path: /healthz
              port: 3000
```

## Rollbacks

```bash
kubectl rollout status deployment/api
kubectl rollout undo deployment/api
```
"##,
    },
    SectionBody {
        id: "k8s-services",
        markdown: r##"
A Service gives a stable virtual IP to a changing set of pods. An Ingress
routes external HTTP traffic to Services.

```yaml
apiVersion: v1
kind: Service
metadata:
  name: api
spec:
  selector:
    app: api
  ports:
    - port: 80
      targetPort: 3000
---
apiVersion: networking.k8s.io/v1
kind: Ingress
metadata:
  name: api
spec:
  rules:
    - host: api.example.com
      http:
        paths:
          - path: /
            pathType: Prefix
            backend:
              service:
                name: api
                port:
                  number: 80
```
"##,
    },
    SectionBody {
        id: "k8s-config",
        markdown: r##"
Configuration is injected through ConfigMaps; credentials through Secrets.
Never bake either into an image.

```yaml
apiVersion: v1
kind: ConfigMap
metadata:
  name: api-config
data:
  LOG_LEVEL: info
  FEATURE_FLAGS: "search,export"
```

```bash
kubectl create secret generic api-db \
  --from-literal=DATABASE_URL='postgres://api@db:5432/api'
```
"##,
    },
    SectionBody {
        id: "helm",
        markdown: r##"
Helm packages manifests as charts with per-environment values files.

```bash
helm upgrade --install api ./charts/api \
  --namespace payments-staging \
  --values charts/api/values-staging.yaml
```

```yaml
replicaCount: 3
image:
  repository: registry.example.com/api
  tag: abc1234
resources:
  limits:
    cpu: 500m
    memory: 256Mi
```
"##,
    },
    SectionBody {
        id: "monitoring",
        markdown: r##"
Every service exposes `/metrics` for Prometheus and writes structured JSON
logs to stdout.

```yaml
apiVersion: monitoring.coreos.com/v1
kind: ServiceMonitor
metadata:
  name: api
spec:
  selector:
    matchLabels:
      app: api
  endpoints:
    - port: http
      interval: 30s
```
"##,
    },
    SectionBody {
        id: "troubleshooting",
        markdown: r##"
Start from the events, then the logs, then the node.

- `CrashLoopBackOff`: the container exits repeatedly; read the previous logs.
- `ImagePullBackOff`: wrong tag or missing registry credentials.
- `Pending`: no node satisfies the resource requests.

```bash
kubectl get events --sort-by=.lastTimestamp
kubectl logs api-7d4b9c6f5-xk2lp --previous
kubectl top pods
```
"##,
    },
];

/// Markdown body for a section id
pub fn body(id: &str) -> Option<&'static str> {
    SECTION_BODIES
        .iter()
        .find(|b| b.id == id)
        .map(|b| b.markdown)
}
